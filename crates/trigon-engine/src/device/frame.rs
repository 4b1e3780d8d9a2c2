/// A single acquired surface frame plus its command recording scope.
///
/// Short-lived: holding the surface texture blocks acquisition of the next
/// frame, so it must be submitted (or dropped) within the same tick.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
