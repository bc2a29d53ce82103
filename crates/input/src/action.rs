use serde::{Deserialize, Serialize};

/// A high-level action the controller and application respond to.
///
/// The camera never sees raw keys, only actions, so bindings can change
/// without touching controller logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
    /// Held to multiply movement speed.
    Sprint,
    Jump,
    /// Flip between filled and wireframe rasterization.
    TogglePolygonMode,
    /// Shift the texture blend toward the second texture.
    MixUp,
    /// Shift the texture blend toward the first texture.
    MixDown,
    ToggleHud,
    Quit,
}

/// Window-system-independent key names.
///
/// Only keys that have a default binding, or that users commonly rebind to,
/// are listed; the desktop app translates its platform key codes into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    E,
    Q,
    F,
    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    Tab,
    Up,
    Down,
    Left,
    Right,
    F1,
    Escape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_by_name() {
        let json = serde_json::to_string(&Action::TogglePolygonMode).unwrap();
        assert_eq!(json, "\"TogglePolygonMode\"");
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Action::TogglePolygonMode);
    }

    #[test]
    fn keys_are_ordered_for_stable_tables() {
        assert!(Key::W < Key::Escape);
    }
}
