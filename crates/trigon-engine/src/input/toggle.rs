use super::types::{InputEvent, Key, KeyState};

/// Maps press/release of one designated key onto the alternate-mode flag.
///
/// The flag follows the key: pressed means alternate, released means default.
/// Events for any other key leave it untouched.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ModeToggle {
    key: Key,
}

impl ModeToggle {
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    /// Returns the new flag value if `event` concerns the designated key.
    pub fn apply(&self, event: &InputEvent) -> Option<bool> {
        match event {
            InputEvent::Key { key, state, .. } if *key == self.key => {
                Some(*state == KeyState::Pressed)
            }
            _ => None,
        }
    }
}

impl Default for ModeToggle {
    fn default() -> Self {
        Self::new(Key::Space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_activates_release_deactivates() {
        let t = ModeToggle::default();
        assert_eq!(t.apply(&key(Key::Space, KeyState::Pressed)), Some(true));
        assert_eq!(t.apply(&key(Key::Space, KeyState::Released)), Some(false));
    }

    #[test]
    fn other_keys_are_ignored() {
        let t = ModeToggle::default();
        assert_eq!(t.apply(&key(Key::Enter, KeyState::Pressed)), None);
        assert_eq!(t.apply(&key(Key::Unknown(7), KeyState::Released)), None);
    }

    #[test]
    fn repeat_keeps_flag_set() {
        let t = ModeToggle::default();
        let ev = InputEvent::Key { key: Key::Space, state: KeyState::Pressed, repeat: true };
        assert_eq!(t.apply(&ev), Some(true));
    }

    #[test]
    fn custom_key_is_designated() {
        let t = ModeToggle::new(Key::Tab);
        assert_eq!(t.key(), Key::Tab);
        assert_eq!(t.apply(&key(Key::Tab, KeyState::Pressed)), Some(true));
        assert_eq!(t.apply(&key(Key::Space, KeyState::Pressed)), None);
    }

    // Every sequence of up to 8 press/release events, interleaved with noise
    // from another key: the flag must equal "last designated event was a press".
    #[test]
    fn flag_tracks_most_recent_designated_event() {
        let t = ModeToggle::default();

        for len in 0..=8u32 {
            for bits in 0..(1u32 << len) {
                let mut flag = false;
                let mut last_press = None;

                for i in 0..len {
                    let pressed = bits & (1 << i) != 0;
                    let state = if pressed { KeyState::Pressed } else { KeyState::Released };

                    if let Some(v) = t.apply(&key(Key::Enter, KeyState::Pressed)) {
                        flag = v;
                    }
                    if let Some(v) = t.apply(&key(Key::Space, state)) {
                        flag = v;
                    }
                    last_press = Some(pressed);
                }

                assert_eq!(flag, last_press.unwrap_or(false), "len={len} bits={bits:#b}");
            }
        }
    }
}
