use super::ctx::GpuContext;
use super::mode::Mode;
use super::shader::ShaderSource;

/// Description of one render pipeline.
///
/// Both driver pipelines share every field except `fragment_entry` (and the
/// label derived from it).
#[derive(Debug, Clone)]
pub struct PipelineSpec<'a> {
    pub label: &'a str,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    pub format: wgpu::TextureFormat,
    pub primitive: wgpu::PrimitiveState,
    pub multisample: wgpu::MultisampleState,
}

/// Triangle list, counter-clockwise front faces, back faces culled.
pub const TRIANGLE_PRIMITIVE: wgpu::PrimitiveState = wgpu::PrimitiveState {
    topology: wgpu::PrimitiveTopology::TriangleList,
    strip_index_format: None,
    front_face: wgpu::FrontFace::Ccw,
    cull_mode: Some(wgpu::Face::Back),
    polygon_mode: wgpu::PolygonMode::Fill,
    unclipped_depth: false,
    conservative: false,
};

pub const SINGLE_SAMPLE: wgpu::MultisampleState = wgpu::MultisampleState {
    count: 1,
    mask: !0,
    alpha_to_coverage_enabled: false,
};

/// The two pipelines selectable by [`Mode`].
#[derive(Debug)]
pub struct PipelinePair<P> {
    pub default: P,
    pub alternate: P,
}

impl<P> PipelinePair<P> {
    #[inline]
    pub fn select(&self, mode: Mode) -> &P {
        match mode {
            Mode::Default => &self.default,
            Mode::Alternate => &self.alternate,
        }
    }
}

/// Builds one pipeline from `program`, varying only the fragment entry point.
pub fn build_pipeline<G: GpuContext>(
    gpu: &G,
    program: &G::Program,
    source: &ShaderSource,
    label: &str,
    fragment_entry: &str,
) -> G::Pipeline {
    let spec = PipelineSpec {
        label,
        vertex_entry: &source.vertex_entry,
        fragment_entry,
        format: gpu.surface_format(),
        primitive: TRIANGLE_PRIMITIVE,
        multisample: SINGLE_SAMPLE,
    };
    gpu.create_pipeline(program, &spec)
}

/// Compiles `source` once and builds the default and alternate pipelines from it.
pub fn build_pair<G: GpuContext>(gpu: &G, source: &ShaderSource) -> PipelinePair<G::Pipeline> {
    let program = gpu.create_program(source);

    let default = build_pipeline(
        gpu,
        &program,
        source,
        "trigon default pipeline",
        &source.fragment_entry,
    );
    let alternate = build_pipeline(
        gpu,
        &program,
        source,
        "trigon alternate pipeline",
        &source.alternate_fragment_entry,
    );

    log::debug!(
        "built pipelines for {:?} (fragment entries {:?} / {:?})",
        gpu.surface_format(),
        source.fragment_entry,
        source.alternate_fragment_entry,
    );

    PipelinePair { default, alternate }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingGpu;

    #[test]
    fn pair_shares_one_program() {
        let gpu = RecordingGpu::new();
        let _pair = build_pair(&gpu, &ShaderSource::wgsl("src"));
        assert_eq!(gpu.programs_created(), 1);
    }

    #[test]
    fn pair_differs_only_in_fragment_entry() {
        let gpu = RecordingGpu::new();
        let pair = build_pair(&gpu, &ShaderSource::wgsl("src"));

        assert_ne!(pair.default.label, pair.alternate.label);
        assert_eq!(pair.default.fragment_entry, "fs_main");
        assert_eq!(pair.alternate.fragment_entry, "second_fs_main");
        assert_eq!(pair.default.vertex_entry, pair.alternate.vertex_entry);
        assert_eq!(pair.default.format, pair.alternate.format);
        assert_eq!(pair.default.primitive, pair.alternate.primitive);
    }

    #[test]
    fn pipelines_target_surface_format() {
        let gpu = RecordingGpu::with_format(wgpu::TextureFormat::Rgba8UnormSrgb);
        let pair = build_pair(&gpu, &ShaderSource::wgsl("src"));
        assert_eq!(pair.default.format, wgpu::TextureFormat::Rgba8UnormSrgb);
    }

    #[test]
    fn select_follows_mode() {
        let pair = PipelinePair { default: 'a', alternate: 'b' };
        assert_eq!(*pair.select(Mode::Default), 'a');
        assert_eq!(*pair.select(Mode::Alternate), 'b');
    }
}
