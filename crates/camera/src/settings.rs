use serde::{Deserialize, Serialize};
use std::path::Path;
use vista_common::{ConfigError, ControllerConfig};
use vista_input::Bindings;

/// Everything a user can configure from a JSON file: controller tunables
/// and key bindings. Missing sections fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub controller: ControllerConfig,
    pub bindings: Bindings,
}

impl Settings {
    /// Load and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&data)?;
        tracing::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(data)?;
        settings.controller.validate()?;
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write settings as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vista_input::{Action, Key};

    #[test]
    fn empty_object_is_all_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn overrides_only_named_fields() {
        let settings = Settings::from_json(
            r#"{ "controller": { "base_speed": 4.0 }, "bindings": { "F": "TogglePolygonMode" } }"#,
        )
        .unwrap();
        assert_eq!(settings.controller.base_speed, 4.0);
        assert_eq!(settings.controller.sensitivity, 0.1);
        assert_eq!(
            settings.bindings.action_for(Key::F),
            Some(Action::TogglePolygonMode)
        );
        // an explicit bindings table replaces the defaults
        assert_eq!(settings.bindings.action_for(Key::W), None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = Settings::from_json(r#"{ "controller": { "near": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = Settings::from_json("{ controller").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vista.json");

        let mut settings = Settings::default();
        settings.controller.sprint_multiplier = 3.0;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
