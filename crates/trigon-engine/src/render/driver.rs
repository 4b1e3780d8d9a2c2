use winit::dpi::PhysicalSize;

use crate::input::{InputEvent, Key, ModeToggle};

use super::ctx::{DrawCall, GpuContext, PassDesc};
use super::mode::Mode;
use super::pipeline::{build_pair, PipelinePair};
use super::shader::ShaderSource;

/// Frame driver configuration.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Background colour the pass clears to.
    pub clear_color: wgpu::Color,

    /// Key that selects the alternate pipeline while held.
    pub toggle_key: Key,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color { r: 0.1, g: 0.2, b: 0.3, a: 1.0 },
            toggle_key: Key::Space,
        }
    }
}

/// Result of one `render_frame` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// A frame was recorded and submitted using the pipeline for `Mode`.
    Presented(Mode),
    /// The surface was unavailable; nothing was submitted.
    Skipped,
}

/// Holds the two triangle pipelines and the alternate-mode flag, and draws
/// one frame per call.
pub struct FrameDriver<G: GpuContext> {
    gpu: G,
    pipelines: PipelinePair<G::Pipeline>,
    clear_color: wgpu::Color,
    toggle: ModeToggle,
    alternate_active: bool,
}

impl<G: GpuContext> FrameDriver<G> {
    /// Builds both pipelines from `shader` against an already initialized context.
    pub fn new(gpu: G, shader: &ShaderSource, config: &DriverConfig) -> Self {
        let pipelines = build_pair(&gpu, shader);

        Self {
            gpu,
            pipelines,
            clear_color: config.clear_color,
            toggle: ModeToggle::new(config.toggle_key),
            alternate_active: false,
        }
    }

    /// Sets the alternate-mode flag. Takes effect from the next `render_frame`.
    pub fn set_mode(&mut self, active: bool) {
        if self.alternate_active != active {
            log::trace!("alternate mode {}", if active { "on" } else { "off" });
        }
        self.alternate_active = active;
    }

    /// Applies `event` to the mode flag if it concerns the toggle key.
    ///
    /// Returns `true` when the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match self.toggle.apply(event) {
            Some(active) => {
                self.set_mode(active);
                true
            }
            None => false,
        }
    }

    pub fn mode(&self) -> Mode {
        Mode::from_active(self.alternate_active)
    }

    pub fn gpu(&self) -> &G {
        &self.gpu
    }

    /// Forwards a drawable size change to the context.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
    }

    /// Draws the triangle with the pipeline selected by the current mode.
    ///
    /// An unavailable surface skips the frame without submitting anything.
    pub fn render_frame(&mut self) -> FrameOutcome {
        // Sampled once, before any GPU work.
        let mode = self.mode();

        let Some(mut frame) = self.gpu.acquire_frame() else {
            return FrameOutcome::Skipped;
        };

        let pass = PassDesc {
            label: "trigon triangle pass",
            clear: self.clear_color,
            pipeline: self.pipelines.select(mode),
            draw: DrawCall::TRIANGLE,
        };
        self.gpu.record_pass(&mut frame, &pass);
        self.gpu.submit(frame);

        FrameOutcome::Presented(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingGpu;

    fn driver() -> FrameDriver<RecordingGpu> {
        FrameDriver::new(
            RecordingGpu::new(),
            &ShaderSource::wgsl("// test"),
            &DriverConfig::default(),
        )
    }

    #[test]
    fn starts_in_default_mode() {
        assert_eq!(driver().mode(), Mode::Default);
    }

    #[test]
    fn default_mode_binds_default_pipeline() {
        let mut d = driver();
        d.set_mode(false);
        assert_eq!(d.render_frame(), FrameOutcome::Presented(Mode::Default));
        assert_eq!(d.gpu().last_bound_fragment(), Some("fs_main"));
    }

    #[test]
    fn alternate_mode_binds_alternate_pipeline() {
        let mut d = driver();
        d.set_mode(true);
        assert_eq!(d.render_frame(), FrameOutcome::Presented(Mode::Alternate));
        assert_eq!(d.gpu().last_bound_fragment(), Some("second_fs_main"));
    }

    #[test]
    fn switching_back_and_forth() {
        let mut d = driver();

        d.set_mode(false);
        d.render_frame();
        assert_eq!(d.gpu().last_bound_fragment(), Some("fs_main"));

        d.set_mode(true);
        d.render_frame();
        assert_eq!(d.gpu().last_bound_fragment(), Some("second_fs_main"));

        d.set_mode(false);
        d.render_frame();
        assert_eq!(d.gpu().last_bound_fragment(), Some("fs_main"));

        assert_eq!(d.gpu().submissions.len(), 3);
    }

    #[test]
    fn one_triangle_draw_per_frame_in_either_mode() {
        let mut d = driver();
        for active in [false, true, true, false] {
            d.set_mode(active);
            d.render_frame();
        }

        for frame in &d.gpu().submissions {
            assert_eq!(frame.passes.len(), 1);
            let draw = &frame.passes[0].draw;
            assert_eq!(draw.vertex_count(), 3);
            assert_eq!(draw.instance_count(), 1);
        }
    }

    #[test]
    fn pass_clears_to_configured_color() {
        let mut d = driver();
        d.render_frame();
        let pass = &d.gpu().submissions[0].passes[0];
        assert_eq!(pass.label, "trigon triangle pass");
        assert_eq!(pass.clear, DriverConfig::default().clear_color);
    }

    #[test]
    fn unavailable_surface_submits_nothing() {
        let mut gpu = RecordingGpu::new();
        gpu.set_surface_available(false);
        let mut d = FrameDriver::new(gpu, &ShaderSource::wgsl(""), &DriverConfig::default());

        assert_eq!(d.render_frame(), FrameOutcome::Skipped);
        assert_eq!(d.gpu().acquired, 0);
        assert!(d.gpu().submissions.is_empty());
    }

    #[test]
    fn mode_change_after_frame_shows_next_frame() {
        let mut d = driver();
        d.render_frame();
        d.set_mode(true);
        assert_eq!(d.gpu().last_bound_fragment(), Some("fs_main"));
        d.render_frame();
        assert_eq!(d.gpu().last_bound_fragment(), Some("second_fs_main"));
    }

    fn key(key: Key, state: crate::input::KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn toggle_key_drives_mode() {
        use crate::input::KeyState;

        let mut d = driver();
        assert!(d.handle_input(&key(Key::Space, KeyState::Pressed)));
        assert_eq!(d.render_frame(), FrameOutcome::Presented(Mode::Alternate));
        assert!(d.handle_input(&key(Key::Space, KeyState::Released)));
        assert_eq!(d.render_frame(), FrameOutcome::Presented(Mode::Default));
    }

    #[test]
    fn configured_toggle_key_replaces_space() {
        use crate::input::KeyState;

        let config = DriverConfig { toggle_key: Key::Escape, ..Default::default() };
        let mut d = FrameDriver::new(RecordingGpu::new(), &ShaderSource::wgsl(""), &config);

        assert!(!d.handle_input(&key(Key::Space, KeyState::Pressed)));
        assert_eq!(d.mode(), Mode::Default);
        assert!(d.handle_input(&key(Key::Escape, KeyState::Pressed)));
        assert_eq!(d.mode(), Mode::Alternate);
    }

    #[test]
    fn resize_reaches_context() {
        let mut d = driver();
        d.resize(PhysicalSize::new(640, 480));
        assert_eq!(d.gpu().sizes, vec![PhysicalSize::new(640, 480)]);
    }
}
