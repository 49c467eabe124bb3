//! Keyboard input handling
//!
//! Maps physical key names (as reported by `KeyboardEvent.key`) to the four
//! logical paddle actions and tracks which of them are currently held.

use serde::{Deserialize, Serialize};

use crate::sim::{PaddleCommand, Side};

/// Logical paddle actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleAction {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

/// Key assigned to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub left_up: String,
    pub left_down: String,
    pub right_up: String,
    pub right_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: "a".to_string(),
            left_down: "z".to_string(),
            right_up: "ArrowUp".to_string(),
            right_down: "ArrowDown".to_string(),
        }
    }
}

impl KeyBindings {
    /// Resolve a key name to an action. Single letters match either case.
    pub fn action_for(&self, key: &str) -> Option<PaddleAction> {
        let matches = |bound: &str| {
            if bound.chars().count() == 1 {
                bound.eq_ignore_ascii_case(key)
            } else {
                bound == key
            }
        };

        if matches(&self.left_up) {
            Some(PaddleAction::LeftUp)
        } else if matches(&self.left_down) {
            Some(PaddleAction::LeftDown)
        } else if matches(&self.right_up) {
            Some(PaddleAction::RightUp)
        } else if matches(&self.right_down) {
            Some(PaddleAction::RightDown)
        } else {
            None
        }
    }
}

/// Which actions are held down right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

impl HeldKeys {
    pub fn set(&mut self, action: PaddleAction, down: bool) {
        match action {
            PaddleAction::LeftUp => self.left_up = down,
            PaddleAction::LeftDown => self.left_down = down,
            PaddleAction::RightUp => self.right_up = down,
            PaddleAction::RightDown => self.right_down = down,
        }
    }

    /// Handle key down event; returns true if the key is bound
    pub fn key_down(&mut self, bindings: &KeyBindings, key: &str) -> bool {
        match bindings.action_for(key) {
            Some(action) => {
                self.set(action, true);
                true
            }
            None => false,
        }
    }

    /// Handle key up event; returns true if the key is bound
    pub fn key_up(&mut self, bindings: &KeyBindings, key: &str) -> bool {
        match bindings.action_for(key) {
            Some(action) => {
                self.set(action, false);
                true
            }
            None => false,
        }
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn command(&self, side: Side) -> PaddleCommand {
        match side {
            Side::Left => PaddleCommand {
                up: self.left_up,
                down: self.left_down,
            },
            Side::Right => PaddleCommand {
                up: self.right_up,
                down: self.right_down,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for("a"), Some(PaddleAction::LeftUp));
        assert_eq!(keys.action_for("A"), Some(PaddleAction::LeftUp));
        assert_eq!(keys.action_for("Z"), Some(PaddleAction::LeftDown));
        assert_eq!(keys.action_for("ArrowUp"), Some(PaddleAction::RightUp));
        assert_eq!(keys.action_for("ArrowDown"), Some(PaddleAction::RightDown));
        assert_eq!(keys.action_for("arrowdown"), None);
        assert_eq!(keys.action_for(" "), None);
    }

    #[test]
    fn test_held_keys_track_press_and_release() {
        let keys = KeyBindings::default();
        let mut held = HeldKeys::default();

        assert!(held.key_down(&keys, "a"));
        assert!(held.key_down(&keys, "ArrowDown"));
        assert!(!held.key_down(&keys, "q"));

        assert_eq!(held.command(Side::Left), PaddleCommand { up: true, down: false });
        assert_eq!(held.command(Side::Right), PaddleCommand { up: false, down: true });

        held.key_up(&keys, "A");
        assert_eq!(held.command(Side::Left), PaddleCommand::default());

        held.clear();
        assert_eq!(held, HeldKeys::default());
    }
}
