//! Keyboard state
//!
//! Browser key events are folded into a set of held logical keys. Arrow keys
//! and WASD are aliases for the same directions; a direction stays held while
//! any of its physical keys is down.

use std::collections::HashSet;

use crate::sim::{HeldDirections, TickInput};

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Up,
    Down,
    Left,
    Right,
    /// Dash
    Action,
}

impl LogicalKey {
    /// Map a `KeyboardEvent.code` value (layout independent)
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(LogicalKey::Up),
            "ArrowDown" | "KeyS" => Some(LogicalKey::Down),
            "ArrowLeft" | "KeyA" => Some(LogicalKey::Left),
            "ArrowRight" | "KeyD" => Some(LogicalKey::Right),
            "Space" => Some(LogicalKey::Action),
            _ => None,
        }
    }

    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(LogicalKey::Up),
            "ArrowDown" | "s" | "S" => Some(LogicalKey::Down),
            "ArrowLeft" | "a" | "A" => Some(LogicalKey::Left),
            "ArrowRight" | "d" | "D" => Some(LogicalKey::Right),
            " " | "Spacebar" => Some(LogicalKey::Action),
            _ => None,
        }
    }
}

/// Physical keys currently held, tracked by their event code
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown. Returns the logical key if the game uses it.
    pub fn press(&mut self, code: &str) -> Option<LogicalKey> {
        let key = LogicalKey::from_key_code(code)?;
        self.held.insert(code.to_string());
        Some(key)
    }

    /// Record a keyup
    pub fn release(&mut self, code: &str) -> Option<LogicalKey> {
        let key = LogicalKey::from_key_code(code)?;
        self.held.remove(code);
        Some(key)
    }

    /// Whether any physical key mapped to `key` is down
    pub fn is_held(&self, key: LogicalKey) -> bool {
        self.held
            .iter()
            .any(|code| LogicalKey::from_key_code(code) == Some(key))
    }

    /// Forget everything (window blur, scene change)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Input for the next simulation step
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            held: HeldDirections {
                up: self.is_held(LogicalKey::Up),
                down: self.is_held(LogicalKey::Down),
                left: self.is_held(LogicalKey::Left),
                right: self.is_held(LogicalKey::Right),
            },
            action: self.is_held(LogicalKey::Action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::new();
        assert_eq!(input.press("KeyW"), Some(LogicalKey::Up));
        assert!(input.is_held(LogicalKey::Up));
        assert_eq!(input.release("KeyW"), Some(LogicalKey::Up));
        assert!(!input.is_held(LogicalKey::Up));
    }

    #[test]
    fn test_aliases_hold_independently() {
        let mut input = InputState::new();
        input.press("ArrowLeft");
        input.press("KeyA");
        input.release("ArrowLeft");
        assert!(input.is_held(LogicalKey::Left));
        input.release("KeyA");
        assert!(!input.is_held(LogicalKey::Left));
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let mut input = InputState::new();
        assert_eq!(input.press("KeyQ"), None);
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_snapshot() {
        let mut input = InputState::new();
        input.press("ArrowDown");
        input.press("KeyD");
        input.press("Space");
        let snap = input.snapshot();
        assert!(snap.held.down && snap.held.right);
        assert!(!snap.held.up && !snap.held.left);
        assert!(snap.action);

        input.clear();
        assert_eq!(input.snapshot(), TickInput::default());
    }

    #[test]
    fn test_key_values() {
        assert_eq!(LogicalKey::from_key("W"), Some(LogicalKey::Up));
        assert_eq!(LogicalKey::from_key(" "), Some(LogicalKey::Action));
        assert_eq!(LogicalKey::from_key("Enter"), None);
    }
}
