use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{FOV_MAX_DEGREES, FOV_MIN_DEGREES, PITCH_LIMIT_DEGREES};

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the first-person camera controller.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Degrees of rotation per unit of mouse movement.
    pub sensitivity: f32,
    /// Walk speed in world units per second.
    pub base_speed: f32,
    /// Speed multiplier while sprint is held.
    pub sprint_multiplier: f32,
    /// Pitch is clamped to `[-pitch_limit, pitch_limit]` degrees.
    pub pitch_limit: f32,
    pub fov_min: f32,
    pub fov_max: f32,
    pub initial_fov: f32,
    pub initial_yaw: f32,
    pub initial_pitch: f32,
    pub initial_position: Vec3,
    /// Angular rate of the jump arc; the arc lands after `PI / jump_frequency` seconds.
    pub jump_frequency: f32,
    /// Peak height of the jump arc.
    pub jump_amplitude: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            base_speed: 2.5,
            sprint_multiplier: 2.0,
            pitch_limit: PITCH_LIMIT_DEGREES,
            fov_min: FOV_MIN_DEGREES,
            fov_max: FOV_MAX_DEGREES,
            initial_fov: 45.0,
            initial_yaw: -90.0,
            initial_pitch: 0.0,
            initial_position: Vec3::new(0.0, 0.0, 3.0),
            jump_frequency: 5.0,
            jump_amplitude: 2.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl ControllerConfig {
    /// Reject values that would break the controller's invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("sensitivity", self.sensitivity),
            ("base_speed", self.base_speed),
            ("sprint_multiplier", self.sprint_multiplier),
            ("jump_frequency", self.jump_frequency),
            ("near", self.near),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.pitch_limit > 0.0 && self.pitch_limit < 90.0) {
            return Err(ConfigError::Invalid(format!(
                "pitch_limit must be inside (0, 90), got {}",
                self.pitch_limit
            )));
        }
        if !(self.fov_min > 0.0 && self.fov_min <= self.fov_max && self.fov_max < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov bounds [{}, {}] are not a usable range",
                self.fov_min, self.fov_max
            )));
        }
        if !self.far.is_finite() || self.far <= self.near {
            return Err(ConfigError::Invalid(format!(
                "far plane {} must lie beyond near plane {}",
                self.far, self.near
            )));
        }
        if !self.jump_amplitude.is_finite() || !self.initial_position.is_finite() {
            return Err(ConfigError::Invalid(
                "jump_amplitude and initial_position must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sensitivity, 0.1);
        assert_eq!(config.pitch_limit, 89.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{ "sensitivity": 0.25, "initial_position": [1.0, 2.0, 3.0] }"#)
                .unwrap();
        assert_eq!(config.sensitivity, 0.25);
        assert_eq!(config.initial_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.base_speed, 2.5);
    }

    #[test]
    fn rejects_non_positive_sensitivity() {
        let config = ControllerConfig {
            sensitivity: 0.0,
            ..ControllerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_inverted_fov_bounds() {
        let config = ControllerConfig {
            fov_min: 60.0,
            fov_max: 30.0,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_pitch_limit_at_vertical() {
        let config = ControllerConfig {
            pitch_limit: 90.0,
            ..ControllerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
