use crate::action::{Action, Key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key to action table.
///
/// Several keys may map to the same action. BTreeMap keeps the serialized
/// form stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    map: BTreeMap<Key, Action>,
}

impl Default for Bindings {
    fn default() -> Self {
        let map = BTreeMap::from([
            (Key::W, Action::MoveForward),
            (Key::S, Action::MoveBackward),
            (Key::A, Action::StrafeLeft),
            (Key::D, Action::StrafeRight),
            (Key::ShiftLeft, Action::Sprint),
            (Key::Space, Action::Jump),
            (Key::Tab, Action::TogglePolygonMode),
            (Key::Up, Action::MixUp),
            (Key::Down, Action::MixDown),
            (Key::F1, Action::ToggleHud),
            (Key::Escape, Action::Quit),
        ]);
        Self { map }
    }
}

impl Bindings {
    /// An empty table with nothing bound.
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
        self.map.insert(key, action)
    }

    pub fn unbind(&mut self, key: Key) -> Option<Action> {
        self.map.remove(&key)
    }

    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.map.get(&key).copied()
    }

    /// All keys bound to `action`, in key order.
    pub fn keys_for(&self, action: Action) -> Vec<Key> {
        self.map
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| *k)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_wasd() {
        let b = Bindings::default();
        assert_eq!(b.action_for(Key::W), Some(Action::MoveForward));
        assert_eq!(b.action_for(Key::A), Some(Action::StrafeLeft));
        assert_eq!(b.action_for(Key::Space), Some(Action::Jump));
        assert_eq!(b.action_for(Key::ShiftLeft), Some(Action::Sprint));
        assert_eq!(b.action_for(Key::Q), None);
    }

    #[test]
    fn rebinding_replaces_previous_action() {
        let mut b = Bindings::default();
        let old = b.bind(Key::Tab, Action::ToggleHud);
        assert_eq!(old, Some(Action::TogglePolygonMode));
        assert_eq!(b.keys_for(Action::ToggleHud), vec![Key::Tab, Key::F1]);
    }

    #[test]
    fn unbind_removes_key() {
        let mut b = Bindings::default();
        assert_eq!(b.unbind(Key::Escape), Some(Action::Quit));
        assert!(b.keys_for(Action::Quit).is_empty());
    }

    #[test]
    fn json_is_a_flat_key_map() {
        let mut b = Bindings::empty();
        b.bind(Key::F, Action::TogglePolygonMode);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, r#"{"F":"TogglePolygonMode"}"#);
        let back: Bindings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
