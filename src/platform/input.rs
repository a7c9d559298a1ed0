//! Device input mapping
//!
//! Keyboard codes follow `KeyboardEvent.code` so layouts don't matter.

use crate::sim::InputEvent;

/// Keys the driver cares about beyond game input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Game(InputEvent),
    /// Toggle idle/demo mode
    ToggleIdle,
    /// Toggle the debug overlay
    ToggleDebug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Map a `KeyboardEvent.code` to a key action
pub fn input_for_key(code: &str) -> Option<Key> {
    match code {
        "Space" => Some(Key::Game(InputEvent::Jump)),
        "KeyP" => Some(Key::Game(InputEvent::TogglePause)),
        "Escape" => Some(Key::Game(InputEvent::Pause)),
        "KeyI" => Some(Key::ToggleIdle),
        "KeyD" => Some(Key::ToggleDebug),
        _ => None,
    }
}

/// Mouse button and touch presses both flap
pub fn input_for_pointer(kind: PointerKind, button: i16) -> Option<InputEvent> {
    match kind {
        PointerKind::Mouse if button != 0 => None,
        _ => Some(InputEvent::Jump),
    }
}

/// Auto-pause when the page goes to the background
pub fn input_for_visibility(hidden: bool) -> Option<InputEvent> {
    hidden.then_some(InputEvent::Pause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(input_for_key("Space"), Some(Key::Game(InputEvent::Jump)));
        assert_eq!(
            input_for_key("KeyP"),
            Some(Key::Game(InputEvent::TogglePause))
        );
        assert_eq!(input_for_key("Escape"), Some(Key::Game(InputEvent::Pause)));
        assert_eq!(input_for_key("KeyI"), Some(Key::ToggleIdle));
        assert_eq!(input_for_key("KeyQ"), None);
        // Codes, not characters
        assert_eq!(input_for_key(" "), None);
    }

    #[test]
    fn test_pointer_mapping() {
        assert_eq!(
            input_for_pointer(PointerKind::Mouse, 0),
            Some(InputEvent::Jump)
        );
        assert_eq!(input_for_pointer(PointerKind::Mouse, 2), None);
        assert_eq!(
            input_for_pointer(PointerKind::Touch, 0),
            Some(InputEvent::Jump)
        );
    }

    #[test]
    fn test_visibility_mapping() {
        assert_eq!(input_for_visibility(true), Some(InputEvent::Pause));
        assert_eq!(input_for_visibility(false), None);
    }
}
