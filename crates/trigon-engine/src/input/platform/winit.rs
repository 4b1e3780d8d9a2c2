use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events the input subsystem does not represent.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => Some(translate_key_event(event)),
        _ => None,
    }
}

fn translate_key_event(event: &KeyEvent) -> InputEvent {
    let state = match event.state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };

    InputEvent::Key {
        key: map_key(event.physical_key),
        state,
        repeat: event.repeat,
    }
}

// Physical keys keep the mode key layout-independent.
fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Space => Key::Space,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Escape => Key::Escape,
            KeyCode::Backspace => Key::Backspace,

            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
            KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
            KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode has no stable numeric form in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_maps_to_space() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Space)), Key::Space);
    }

    #[test]
    fn both_shift_keys_map_to_shift() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftLeft)), Key::Shift);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)), Key::Shift);
    }

    #[test]
    fn unnamed_key_keeps_code() {
        assert_eq!(
            map_key(PhysicalKey::Code(KeyCode::KeyQ)),
            Key::Unknown(KeyCode::KeyQ as u32)
        );
    }

    #[test]
    fn unrelated_events_are_dropped() {
        assert_eq!(translate_window_event(&WindowEvent::CloseRequested), None);
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), None);
    }
}
