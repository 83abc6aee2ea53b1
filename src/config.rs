//! Classifier configuration
//!
//! `GazeConfig` is an immutable value object: two thresholds and three feature
//! flags. Construction never validates; `validate` is an explicit opt-in check.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ConfigError;

/// Default velocity threshold for saccade detection
pub const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.5;

/// Default fixation threshold
pub const DEFAULT_FIXATION_THRESHOLD: f64 = 0.2;

/// Thresholds and feature flags shared by a classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    pub velocity_threshold: f64,
    pub fixation_threshold: f64,
    pub dynamic_difficulty_adjustment: bool,
    pub real_time_biofeedback: bool,
    pub pupillometry_analysis: bool,
}

impl Default for GazeConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            fixation_threshold: DEFAULT_FIXATION_THRESHOLD,
            dynamic_difficulty_adjustment: true,
            real_time_biofeedback: true,
            pupillometry_analysis: true,
        }
    }
}

impl GazeConfig {
    /// Create a configuration from explicit values. Any float is accepted.
    pub fn new(
        velocity_threshold: f64,
        fixation_threshold: f64,
        dynamic_difficulty_adjustment: bool,
        real_time_biofeedback: bool,
        pupillometry_analysis: bool,
    ) -> Self {
        Self {
            velocity_threshold,
            fixation_threshold,
            dynamic_difficulty_adjustment,
            real_time_biofeedback,
            pupillometry_analysis,
        }
    }

    /// Parse configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize configuration to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a JSON file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, self.to_json()?)?;
        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Load configuration, writing the defaults to `path` if the file does not exist.
    ///
    /// Malformed JSON is an error rather than a silent fallback.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Configuration file {} not found, creating defaults",
                    path.display()
                );
                let config = Self::default();
                config.save(path)?;
                Ok(config)
            }
            Err(e) => {
                tracing::error!("Failed to load configuration: {}", e);
                Err(e)
            }
        }
    }

    /// Check that both thresholds are finite and within [0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("velocity_threshold", self.velocity_threshold)?;
        check_unit_range("fixation_threshold", self.fixation_threshold)?;
        Ok(())
    }
}

fn check_unit_range(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidParameter(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidParameter(format!(
            "{name} must be between 0 and 1, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("synheart-gaze-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = GazeConfig::default();
        assert_eq!(config.velocity_threshold, 0.5);
        assert_eq!(config.fixation_threshold, 0.2);
        assert!(config.dynamic_difficulty_adjustment);
        assert!(config.real_time_biofeedback);
        assert!(config.pupillometry_analysis);
    }

    #[test]
    fn test_new_accepts_any_float() {
        let config = GazeConfig::new(f64::NAN, -3.0, false, true, false);
        assert!(config.velocity_threshold.is_nan());
        assert_eq!(config.fixation_threshold, -3.0);
        assert!(!config.dynamic_difficulty_adjustment);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GazeConfig::from_json(r#"{"velocity_threshold": 0.8}"#).unwrap();
        assert_eq!(
            config,
            GazeConfig {
                velocity_threshold: 0.8,
                ..GazeConfig::default()
            }
        );
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = GazeConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("config.json");
        let config = GazeConfig::new(0.7, 0.1, false, true, false);
        config.save(&path).unwrap();

        let loaded = GazeConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let path = temp_path("config.json");
        assert!(!path.exists());

        let config = GazeConfig::load_or_create(&path).unwrap();
        assert_eq!(config, GazeConfig::default());
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_or_create_rejects_malformed_file() {
        let path = temp_path("config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();

        let err = GazeConfig::load_or_create(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_validate() {
        assert!(GazeConfig::default().validate().is_ok());
        assert!(GazeConfig::new(1.5, 0.2, true, true, true).validate().is_err());
        assert!(GazeConfig::new(0.5, -0.1, true, true, true).validate().is_err());
        assert!(GazeConfig::new(f64::INFINITY, 0.2, true, true, true)
            .validate()
            .is_err());
    }
}
