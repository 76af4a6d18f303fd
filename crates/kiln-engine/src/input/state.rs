use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for the harness window.
///
/// Answers "is this key held right now", which is all the frame loop polls.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Key { key, state: KeyState::Pressed } => {
                self.keys_down.insert(key);
            }
            InputEvent::Key { key, state: KeyState::Released } => {
                self.keys_down.remove(&key);
            }
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Releases are not delivered while unfocused; avoid stuck keys.
                    self.keys_down.clear();
                }
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn key_state(&self, key: Key) -> KeyState {
        if self.key_down(key) {
            KeyState::Pressed
        } else {
            KeyState::Released
        }
    }
}
