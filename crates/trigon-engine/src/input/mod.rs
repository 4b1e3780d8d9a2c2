//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s; `ModeToggle`
//! turns them into alternate-mode changes.

pub(crate) mod platform;
mod toggle;
mod types;

pub use toggle::ModeToggle;
pub use types::{InputEvent, Key, KeyState};
