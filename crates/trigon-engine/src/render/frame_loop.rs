use winit::dpi::PhysicalSize;

use crate::device::InitError;
use crate::input::InputEvent;
use crate::window::CancelToken;

use super::ctx::GpuContext;
use super::driver::{DriverConfig, FrameDriver, FrameOutcome};
use super::mode::Mode;
use super::shader::ShaderSource;

/// What the scheduler should do after a tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Tick {
    /// A frame was attempted; schedule the next one.
    Continue(FrameOutcome),
    /// The loop is finished (cancelled, or initialization failed).
    Stop,
}

enum LoopState<G: GpuContext> {
    Running(FrameDriver<G>),
    Failed(Option<InitError>),
}

/// Run-until-cancelled wrapper around a [`FrameDriver`].
///
/// The host scheduler calls [`tick`](Self::tick) once per display refresh and
/// reschedules while it returns [`Tick::Continue`].
pub struct FrameLoop<G: GpuContext> {
    state: LoopState<G>,
    cancel: CancelToken,
    presented: u64,
    skipped: u64,
}

impl<G: GpuContext> FrameLoop<G> {
    /// Starts the loop from the outcome of GPU initialization.
    ///
    /// A failed initialization is logged here, once; the loop then never renders.
    pub fn start(
        init: Result<G, InitError>,
        shader: &ShaderSource,
        config: &DriverConfig,
        cancel: CancelToken,
    ) -> Self {
        let state = match init {
            Ok(gpu) => {
                log::info!("GPU ready; surface format {:?}", gpu.surface_format());
                LoopState::Running(FrameDriver::new(gpu, shader, config))
            }
            Err(err) => {
                log::error!("{err}");
                LoopState::Failed(Some(err))
            }
        };

        Self {
            state,
            cancel,
            presented: 0,
            skipped: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_)) && !self.cancel.is_cancelled()
    }

    /// Initialization error, if the loop failed to start.
    pub fn failure(&self) -> Option<&InitError> {
        match &self.state {
            LoopState::Failed(err) => err.as_ref(),
            LoopState::Running(_) => None,
        }
    }

    pub fn take_failure(&mut self) -> Option<InitError> {
        match &mut self.state {
            LoopState::Failed(err) => err.take(),
            LoopState::Running(_) => None,
        }
    }

    pub fn driver(&self) -> Option<&FrameDriver<G>> {
        match &self.state {
            LoopState::Running(d) => Some(d),
            LoopState::Failed(_) => None,
        }
    }

    /// Forwards the alternate-mode flag; ignored when the loop failed.
    pub fn set_mode(&mut self, active: bool) {
        if let LoopState::Running(driver) = &mut self.state {
            driver.set_mode(active);
        }
    }

    /// Forwards an input event to the driver's mode toggle.
    ///
    /// Returns `true` when the toggle consumed it; always `false` when the
    /// loop failed to start.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match &mut self.state {
            LoopState::Running(driver) => driver.handle_input(event),
            LoopState::Failed(_) => false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.driver().map(FrameDriver::mode).unwrap_or_default()
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if let LoopState::Running(driver) = &mut self.state {
            driver.resize(size);
        }
    }

    /// Runs one iteration: checks cancellation, then renders one frame.
    pub fn tick(&mut self) -> Tick {
        if self.cancel.is_cancelled() {
            return Tick::Stop;
        }

        let LoopState::Running(driver) = &mut self.state else {
            return Tick::Stop;
        };

        let outcome = driver.render_frame();
        match outcome {
            FrameOutcome::Presented(_) => self.presented += 1,
            FrameOutcome::Skipped => self.skipped += 1,
        }

        Tick::Continue(outcome)
    }

    /// Number of frames submitted and skipped so far.
    pub fn frame_counts(&self) -> (u64, u64) {
        (self.presented, self.skipped)
    }
}
