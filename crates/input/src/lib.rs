//! Input layer: raw keys mapped to abstract actions, queried per frame.
//!
//! # Invariants
//! - Held (level) and pressed-this-frame (edge) are separate queries.
//! - An OS key repeat never produces a second edge for a held action.
//! - The first mouse sample after a reset yields zero movement.

pub mod action;
pub mod bindings;
pub mod mouse;
pub mod state;

pub use action::{Action, Key};
pub use bindings::Bindings;
pub use mouse::MouseTracker;
pub use state::{ActionEdges, HeldActions, InputState};

pub fn crate_info() -> &'static str {
    "vista-input v0.1.0"
}
