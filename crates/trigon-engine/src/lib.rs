//! Trigon engine crate.
//!
//! Renders one triangle through wgpu, switching between two fragment
//! pipelines while a designated key is held.
//!
//! - `device`: adapter/device/surface acquisition (`Gpu`)
//! - `render`: `GpuContext`, `FrameDriver`, `FrameLoop`
//! - `input`: platform-agnostic key events and the mode toggle
//! - `window`: winit runtime driving the loop once per display refresh

pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod window;
