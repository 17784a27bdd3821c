//! Platform abstraction layer
//!
//! Hosts translate their native key codes into `Key` and hand press/release
//! events to the game. Mapping to game actions happens here.

use crate::sim::InputAction;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    W,
    S,
    Left,
    Right,
    Up,
    Down,
    Space,
    Other,
}

impl Key {
    /// Parse a host key name ("a", "ArrowLeft", "space", ...)
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "a" => Key::A,
            "d" => Key::D,
            "w" => Key::W,
            "s" => Key::S,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "space" | " " => Key::Space,
            _ => Key::Other,
        }
    }
}

/// WASD / arrows move, Space confirms
pub fn map_key(key: Key) -> Option<InputAction> {
    match key {
        Key::A | Key::Left => Some(InputAction::MoveLeft),
        Key::D | Key::Right => Some(InputAction::MoveRight),
        Key::W | Key::Up => Some(InputAction::MoveUp),
        Key::S | Key::Down => Some(InputAction::MoveDown),
        Key::Space => Some(InputAction::Confirm),
        Key::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_agree() {
        assert_eq!(map_key(Key::A), map_key(Key::Left));
        assert_eq!(map_key(Key::D), map_key(Key::Right));
        assert_eq!(map_key(Key::W), map_key(Key::Up));
        assert_eq!(map_key(Key::S), map_key(Key::Down));
        assert_eq!(map_key(Key::Space), Some(InputAction::Confirm));
        assert_eq!(map_key(Key::Other), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_name("W"), Key::W);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("F1"), Key::Other);
    }
}
