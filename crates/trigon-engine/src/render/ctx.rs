use std::ops::Range;

use winit::dpi::PhysicalSize;

use super::pipeline::PipelineSpec;
use super::shader::ShaderSource;

/// GPU capabilities consumed by the frame driver.
///
/// The wgpu-backed implementation is [`crate::device::Gpu`]; tests substitute a
/// recording double. Setup (adapter/device) happens before a context exists, so
/// every method here is synchronous.
pub trait GpuContext {
    /// Compiled shader module together with the layout its pipelines share.
    type Program;

    /// Immutable, precompiled render pipeline.
    type Pipeline;

    /// One acquired surface frame with an open command recording scope.
    type Frame;

    /// Output format the surface was configured with.
    fn surface_format(&self) -> wgpu::TextureFormat;

    fn create_program(&self, source: &ShaderSource) -> Self::Program;

    fn create_pipeline(&self, program: &Self::Program, spec: &PipelineSpec<'_>) -> Self::Pipeline;

    /// Acquires the current surface frame and opens a command encoder for it.
    ///
    /// `None` means the surface is transiently unavailable (resize, occlusion,
    /// timeout); the caller skips this frame.
    fn acquire_frame(&mut self) -> Option<Self::Frame>;

    /// Records a single clearing render pass with one bound pipeline and one draw.
    fn record_pass(&self, frame: &mut Self::Frame, pass: &PassDesc<'_, Self::Pipeline>);

    /// Finishes the frame's command buffer, submits it, and presents.
    fn submit(&mut self, frame: Self::Frame);

    /// Tracks a new drawable size before the next frame.
    fn resize(&mut self, size: PhysicalSize<u32>);
}

/// Non-indexed draw parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub vertices: Range<u32>,
    pub instances: Range<u32>,
}

impl DrawCall {
    /// Three vertices generated in the vertex shader, one instance.
    pub const TRIANGLE: DrawCall = DrawCall {
        vertices: 0..3,
        instances: 0..1,
    };

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }
}

/// Everything a single render pass needs.
pub struct PassDesc<'a, P> {
    pub label: &'a str,
    pub clear: wgpu::Color,
    pub pipeline: &'a P,
    pub draw: DrawCall,
}
