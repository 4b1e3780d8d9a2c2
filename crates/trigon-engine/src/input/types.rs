use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the runtime reacts to (plus common control keys usable as the
/// mode key) have named variants. Everything else maps to `Unknown` carrying
/// the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,

    Shift,
    Control,
    Alt,
    Meta,

    /// Platform-dependent key without a named variant.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when the event is an auto-repeat of a held key.
        repeat: bool,
    },
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unknown(code) => write!(f, "Unknown({code:#x})"),
            named => write!(f, "{named:?}"),
        }
    }
}
