//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the frame loop.

mod cancel;
mod runtime;

pub use cancel::CancelToken;
pub use runtime::{Runtime, RuntimeConfig};
