//! First-person camera controller for the cube scene.
//!
//! Converts per-frame input (held actions, press edges, mouse and scroll
//! samples, clock reads) into an eye position, a look direction, view and
//! projection matrices, and a jump offset.
//!
//! # Invariants
//! - Pitch stays within the configured limit; field-of-view within its bounds.
//! - Movement is applied once per frame and scales with frame time.
//! - A jump in progress cannot be re-triggered.
//! - The controller never calls into the render layer; renderers read it.

mod controller;
mod jump;
mod settings;

pub use controller::CameraController;
pub use jump::JumpState;
pub use settings::Settings;

pub fn crate_info() -> &'static str {
    "vista-camera v0.1.0"
}
