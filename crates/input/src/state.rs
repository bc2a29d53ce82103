use crate::action::{Action, Key};
use crate::bindings::Bindings;
use std::collections::{BTreeMap, BTreeSet};

/// Level-triggered query: is the action held right now?
///
/// Continuous behavior (movement, sprint, texture blending) reads this once
/// per frame.
pub trait HeldActions {
    fn held(&self, action: Action) -> bool;
}

/// Edge-triggered query: did the action go down during this frame?
///
/// Discrete behavior (toggles, jump start) reads this so a held key fires
/// exactly once.
pub trait ActionEdges {
    fn pressed(&self, action: Action) -> bool;
}

/// Per-frame input snapshot fed by window events.
///
/// An action is held while any key bound to it is down or it was pressed
/// directly. Releasing one of two keys bound to the same action keeps it held.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keys currently down, with the action they were bound to when pressed.
    keys: BTreeMap<Key, Action>,
    direct: BTreeSet<Action>,
    pressed: BTreeSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_held(&self, action: Action) -> bool {
        self.direct.contains(&action) || self.keys.values().any(|held| *held == action)
    }

    fn mark_edge(&mut self, action: Action) {
        self.pressed.insert(action);
        tracing::trace!(?action, "action pressed");
    }

    /// Mark an action as down. Returns `true` if this is a new press edge;
    /// a press while already held (key repeat) returns `false`.
    pub fn press(&mut self, action: Action) -> bool {
        let was_held = self.is_held(action);
        self.direct.insert(action);
        if !was_held {
            self.mark_edge(action);
        }
        !was_held
    }

    /// Drop a direct press. Keys still down keep the action held.
    pub fn release(&mut self, action: Action) {
        self.direct.remove(&action);
    }

    /// Route a raw key transition through `bindings`. Unbound keys are ignored.
    ///
    /// A key release drops the action the key was bound to when it went down.
    pub fn handle_key(&mut self, bindings: &Bindings, key: Key, down: bool) -> Option<Action> {
        if !down {
            return match self.keys.remove(&key) {
                Some(action) => Some(action),
                None => bindings.action_for(key),
            };
        }
        let action = bindings.action_for(key)?;
        if !self.keys.contains_key(&key) {
            let was_held = self.is_held(action);
            self.keys.insert(key, action);
            if !was_held {
                self.mark_edge(action);
            }
        }
        Some(action)
    }

    /// Forget this frame's edges; held actions persist.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.direct.clear();
        self.pressed.clear();
    }

    /// Number of distinct actions held.
    pub fn held_count(&self) -> usize {
        self.direct
            .iter()
            .chain(self.keys.values())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

impl HeldActions for InputState {
    fn held(&self, action: Action) -> bool {
        self.is_held(action)
    }
}

impl ActionEdges for InputState {
    fn pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}
