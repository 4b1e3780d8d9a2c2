//! Recording `GpuContext` double for unit tests.

use std::cell::Cell;

use winit::dpi::PhysicalSize;

use super::ctx::{DrawCall, GpuContext, PassDesc};
use super::pipeline::PipelineSpec;
use super::shader::ShaderSource;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StubPipeline {
    pub label: String,
    pub vertex_entry: String,
    pub fragment_entry: String,
    pub format: wgpu::TextureFormat,
    pub primitive: wgpu::PrimitiveState,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedPass {
    pub label: String,
    pub clear: wgpu::Color,
    pub pipeline: StubPipeline,
    pub draw: DrawCall,
}

#[derive(Debug, Default)]
pub(crate) struct StubFrame {
    pub passes: Vec<RecordedPass>,
}

pub(crate) struct RecordingGpu {
    format: wgpu::TextureFormat,
    surface_available: bool,
    programs: Cell<usize>,
    pub acquired: usize,
    pub submissions: Vec<StubFrame>,
    pub sizes: Vec<PhysicalSize<u32>>,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::with_format(wgpu::TextureFormat::Bgra8UnormSrgb)
    }

    pub fn with_format(format: wgpu::TextureFormat) -> Self {
        Self {
            format,
            surface_available: true,
            programs: Cell::new(0),
            acquired: 0,
            submissions: Vec::new(),
            sizes: Vec::new(),
        }
    }

    pub fn set_surface_available(&mut self, available: bool) {
        self.surface_available = available;
    }

    pub fn programs_created(&self) -> usize {
        self.programs.get()
    }

    /// Fragment entry point bound by the most recent submitted pass.
    pub fn last_bound_fragment(&self) -> Option<&str> {
        self.submissions
            .last()
            .and_then(|f| f.passes.last())
            .map(|p| p.pipeline.fragment_entry.as_str())
    }
}

impl GpuContext for RecordingGpu {
    type Program = String;
    type Pipeline = StubPipeline;
    type Frame = StubFrame;

    fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn create_program(&self, source: &ShaderSource) -> String {
        self.programs.set(self.programs.get() + 1);
        source.label.to_string()
    }

    fn create_pipeline(&self, _program: &String, spec: &PipelineSpec<'_>) -> StubPipeline {
        StubPipeline {
            label: spec.label.to_string(),
            vertex_entry: spec.vertex_entry.to_string(),
            fragment_entry: spec.fragment_entry.to_string(),
            format: spec.format,
            primitive: spec.primitive,
        }
    }

    fn acquire_frame(&mut self) -> Option<StubFrame> {
        if !self.surface_available {
            return None;
        }
        self.acquired += 1;
        Some(StubFrame::default())
    }

    fn record_pass(&self, frame: &mut StubFrame, pass: &PassDesc<'_, StubPipeline>) {
        frame.passes.push(RecordedPass {
            label: pass.label.to_string(),
            clear: pass.clear,
            pipeline: pass.pipeline.clone(),
            draw: pass.draw.clone(),
        });
    }

    fn submit(&mut self, frame: StubFrame) {
        self.submissions.push(frame);
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.sizes.push(size);
    }
}
