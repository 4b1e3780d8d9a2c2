use std::fmt;

/// Reasons the GPU context could not be brought up.
///
/// All variants mean the environment cannot render; none are retried.
#[derive(Debug)]
pub enum InitError {
    /// The window reported a zero-sized drawable area.
    ZeroSize,
    /// The platform refused to create a surface for the window.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter compatible with the surface was found.
    NoAdapter(wgpu::RequestAdapterError),
    /// The adapter exists but refused to hand out a device.
    NoDevice(wgpu::RequestDeviceError),
    /// The surface advertises no usable texture format for this adapter.
    NoSurfaceFormat,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "window has zero size"),
            Self::Surface(e) => write!(f, "failed to create GPU surface: {e}"),
            Self::NoAdapter(e) => write!(f, "GPU is not supported: no suitable adapter ({e})"),
            Self::NoDevice(e) => write!(f, "GPU is not supported: device request failed ({e})"),
            Self::NoSurfaceFormat => write!(f, "surface has no supported texture formats"),
        }
    }
}

impl std::error::Error for InitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::NoAdapter(e) => Some(e),
            Self::NoDevice(e) => Some(e),
            Self::ZeroSize | Self::NoSurfaceFormat => None,
        }
    }
}

/// High-level response after a surface acquisition error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering resumes next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// The device ran out of memory; the frame is skipped but later frames
    /// are unlikely to succeed.
    OutOfMemory,
}
