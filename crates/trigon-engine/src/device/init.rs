/// Initialization parameters for the GPU layer.
///
/// Every field has a portable default; override only what a platform needs.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when the surface offers one.
    pub prefer_srgb: bool,

    /// Present mode for the swapchain.
    ///
    /// FIFO paces presentation to the display refresh, which is what the
    /// redraw loop relies on to run once per refresh.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; falls back to the first supported one.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Adapter power preference.
    pub power_preference: wgpu::PowerPreference,

    /// Desired maximum frame latency (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
