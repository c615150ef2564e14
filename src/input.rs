//! Keyboard state
//!
//! Browser key events arrive asynchronously; the frame loop wants "is key X
//! held right now". `KeyboardState` bridges the two.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    P,
    Q,
    Escape,
}

impl Key {
    /// Parse a `KeyboardEvent.code` value (layout independent)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Key::W),
            "KeyA" => Some(Key::A),
            "KeyS" => Some(Key::S),
            "KeyD" => Some(Key::D),
            "KeyP" => Some(Key::P),
            "KeyQ" => Some(Key::Q),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown; returns true if the key is one we track
    pub fn press(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.held.insert(key);
                true
            }
            None => false,
        }
    }

    /// Record a keyup; returns true if the key is one we track
    pub fn release(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.held.remove(&key);
                true
            }
            None => false,
        }
    }

    /// Forget everything (focus lost, keyups will never arrive)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Snapshot for one tick. W/A both mean up, S/D both mean down.
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.is_held(Key::W) || self.is_held(Key::A),
            down: self.is_held(Key::S) || self.is_held(Key::D),
            play: self.is_held(Key::P),
            quit: self.is_held(Key::Q),
            menu: self.is_held(Key::Escape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Key::from_code("KeyW"), Some(Key::W));
        assert_eq!(Key::from_code("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_code("ArrowUp"), None);
        assert_eq!(Key::from_code("w"), None);
    }

    #[test]
    fn test_held_until_released() {
        let mut keys = KeyboardState::new();
        assert!(keys.press("KeyP"));
        assert!(keys.tick_input().play);
        assert!(keys.tick_input().play, "still held on the next frame");

        assert!(keys.release("KeyP"));
        assert!(!keys.tick_input().play);
    }

    #[test]
    fn test_key_pairs_share_actions() {
        let mut keys = KeyboardState::new();
        keys.press("KeyA");
        assert!(keys.tick_input().up);
        keys.press("KeyD");
        let input = keys.tick_input();
        assert!(input.up && input.down);
    }

    #[test]
    fn test_untracked_keys_ignored() {
        let mut keys = KeyboardState::new();
        assert!(!keys.press("Space"));
        assert_eq!(keys.tick_input(), TickInput::default());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut keys = KeyboardState::new();
        keys.press("KeyW");
        keys.press("Escape");
        keys.clear();
        assert_eq!(keys.tick_input(), TickInput::default());
    }
}
