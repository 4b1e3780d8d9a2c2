use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit, InitError};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputEvent, Key, KeyState};
use crate::render::{DriverConfig, FrameLoop, ShaderSource, Tick};

use super::CancelToken;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and renders until it is closed or Escape is pressed.
    pub fn run(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        driver: DriverConfig,
        shader: ShaderSource,
    ) -> Result<()> {
        Self::run_until(config, gpu_init, driver, shader, CancelToken::new())
    }

    /// Like [`run`](Self::run), but also stops once `cancel` is triggered.
    ///
    /// Errors are logged before they are returned. A GPU initialization failure
    /// comes back as an [`InitError`] inside the `anyhow::Error`.
    pub fn run_until(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        driver: DriverConfig,
        shader: ShaderSource,
        cancel: CancelToken,
    ) -> Result<()> {
        let event_loop = EventLoop::new()
            .context("failed to create winit EventLoop")
            .inspect_err(|e| log::error!("{e:#}"))?;

        let mut state = AppState::new(config, gpu_init, driver, shader, cancel);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")
            .inspect_err(|e| log::error!("{e:#}"))?;

        state.finish()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[not_covariant]
    frame_loop: FrameLoop<Gpu<'this>>,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    driver: DriverConfig,
    shader: ShaderSource,
    cancel: CancelToken,

    entry: Option<WindowEntry>,
    init_failure: Option<InitError>,
    error: Option<anyhow::Error>,
}

impl AppState {
    fn new(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        driver: DriverConfig,
        shader: ShaderSource,
        cancel: CancelToken,
    ) -> Self {
        Self {
            config,
            gpu_init,
            driver,
            shader,
            cancel,
            entry: None,
            init_failure: None,
            error: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let shader = &self.shader;
        let driver = &self.driver;
        let cancel = self.cancel.clone();

        Ok(WindowEntryBuilder {
            window,
            frame_loop_builder: |w| {
                let gpu = pollster::block_on(Gpu::new(w, gpu_init));
                FrameLoop::start(gpu, shader, driver, cancel)
            },
        }
        .build())
    }

    fn handle_input(&mut self, event: &InputEvent) {
        // The mode toggle sees the event first, so any key can be the toggle key.
        let consumed = self
            .entry
            .as_mut()
            .is_some_and(|entry| entry.with_frame_loop_mut(|l| l.handle_input(event)));

        if quit_requested(event, consumed) {
            log::info!("escape pressed; stopping");
            self.cancel.cancel();
        }
    }

    fn finish(self) -> Result<()> {
        if let Some(err) = self.init_failure {
            return Err(err.into());
        }
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let mut entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(e) => {
                log::error!("{e:#}");
                self.error = Some(e);
                event_loop.exit();
                return;
            }
        };

        // Already reported by the frame loop; keep it for the caller.
        if let Some(err) = entry.with_frame_loop_mut(|l| l.take_failure()) {
            self.init_failure = Some(err);
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);
        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.cancel.is_cancelled() {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(ev) = translate_window_event(&event) {
            self.handle_input(&ev);
        }

        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.cancel.cancel();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                entry.with_frame_loop_mut(|l| l.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_frame_loop_mut(|l| l.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let tick = entry.with_mut(|fields| {
                    fields.window.pre_present_notify();
                    fields.frame_loop.tick()
                });

                match tick {
                    // Each frame schedules the next; FIFO present paces it
                    // to the display refresh.
                    Tick::Continue(_) => entry.with_window(|w| w.request_redraw()),
                    Tick::Stop => {
                        let (presented, skipped) = entry.with_frame_loop(|l| l.frame_counts());
                        log::info!("frame loop stopped ({presented} presented, {skipped} skipped)");
                        event_loop.exit();
                    }
                }
            }

            _ => {}
        }
    }
}

/// Escape stops the loop unless the mode toggle already consumed it.
fn quit_requested(event: &InputEvent, consumed_by_toggle: bool) -> bool {
    !consumed_by_toggle
        && matches!(
            event,
            InputEvent::Key {
                key: Key::Escape,
                state: KeyState::Pressed,
                ..
            }
        )
}
