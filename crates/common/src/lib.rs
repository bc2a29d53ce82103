//! Shared types for the vista exercises: orientation, zoom, display toggles,
//! the clock seam, and controller configuration.
//!
//! # Invariants
//! - Pitch never leaves its configured limit.
//! - Field-of-view never leaves its configured bounds.

pub mod clock;
pub mod config;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, ControllerConfig};
pub use types::{FieldOfView, Orientation, PolygonMode, TextureMix};

pub fn crate_info() -> &'static str {
    "vista-common v0.1.0"
}
