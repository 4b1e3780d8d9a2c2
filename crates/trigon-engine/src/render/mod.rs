//! Frame rendering.
//!
//! `FrameDriver` owns the two triangle pipelines and the alternate-mode flag
//! and records one pass per frame through a `GpuContext`. `FrameLoop` wraps it
//! with initialization outcome and cancellation for the host scheduler.
//!
//! Convention:
//! - geometry comes from the vertex shader (`vertex_index`), no vertex buffers
//! - both pipelines share one shader module and layout

mod ctx;
mod driver;
mod frame_loop;
mod mode;
pub mod pipeline;
mod shader;

#[cfg(test)]
pub(crate) mod testing;

pub use ctx::{DrawCall, GpuContext, PassDesc};
pub use driver::{DriverConfig, FrameDriver, FrameOutcome};
pub use frame_loop::{FrameLoop, Tick};
pub use mode::Mode;
pub use pipeline::{PipelinePair, PipelineSpec};
pub use shader::ShaderSource;
