use serde::{Deserialize, Serialize};

/// Default pitch limit in degrees. Looking straight up or down flips the
/// look-at basis, so the camera stops just short of it.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Narrowest allowed field-of-view, in degrees.
pub const FOV_MIN_DEGREES: f32 = 1.0;

/// Widest allowed field-of-view, in degrees.
pub const FOV_MAX_DEGREES: f32 = 90.0;

/// Camera look angles in degrees.
///
/// Yaw is unbounded; it wraps implicitly through the trigonometry that turns
/// it into a direction. Pitch is kept inside `[-limit, limit]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            yaw: -90.0,
            pitch: 0.0,
        }
    }
}

impl Orientation {
    /// Add angle deltas (degrees) and clamp pitch to `[-pitch_limit, pitch_limit]`.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32, pitch_limit: f32) {
        self.yaw += yaw_delta;
        let limit = pitch_limit.abs();
        self.pitch = (self.pitch + pitch_delta).max(-limit).min(limit);
    }

    pub fn yaw_radians(&self) -> f32 {
        self.yaw.to_radians()
    }

    pub fn pitch_radians(&self) -> f32 {
        self.pitch.to_radians()
    }
}

/// Vertical field-of-view in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FieldOfView(pub f32);

impl Default for FieldOfView {
    fn default() -> Self {
        Self(45.0)
    }
}

impl FieldOfView {
    pub fn degrees(self) -> f32 {
        self.0
    }

    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }

    /// Narrow the view by `amount` degrees (negative widens), staying within `[min, max]`.
    pub fn zoom(&mut self, amount: f32, min: f32, max: f32) {
        self.0 = (self.0 - amount).max(min).min(max);
    }
}

/// How triangles are rasterized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonMode {
    #[default]
    Filled,
    Wireframe,
}

impl PolygonMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Filled => Self::Wireframe,
            Self::Wireframe => Self::Filled,
        }
    }

    pub fn is_wireframe(self) -> bool {
        self == Self::Wireframe
    }
}

/// Blend factor between the two textures of a textured scene, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct TextureMix(f32);

impl TextureMix {
    /// Change applied per frame while a mix key is held.
    pub const STEP: f32 = 0.005;

    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn adjust(&mut self, delta: f32) {
        self.0 = (self.0 + delta).clamp(0.0, 1.0);
    }
}

impl Default for TextureMix {
    fn default() -> Self {
        Self(0.5)
    }
}
