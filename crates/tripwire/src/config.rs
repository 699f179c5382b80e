//! Configuration management for tripwire.
//!
//! Loads the TOML configuration that tunes logging, the event bus and the
//! stateful adapters.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use tripwire_adapters::AdapterConfig;
use tripwire_events::BusConfig;

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Event bus tunables
    #[serde(default)]
    pub bus: BusConfig,
    /// Adapter tunables
    #[serde(default)]
    pub adapters: AdapterConfig,
}

/// Logging system configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration to `path`
    /// and returns it.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, toml_content).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level: {}. Must be one of: {VALID_LEVELS:?}",
                &self.logging.level
            )));
        }

        self.bus
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("bus: {e}")))?;
        self.adapters
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("adapters: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
        assert!(!config.bus.log_unlistened_events);
        assert_eq!(config.bus.max_fault_reports_per_listener, Some(20));
        assert!(config.adapters.track_mouse_drag);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_writes_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tripwire.toml");

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        // Second load reads the file that was just written.
        let reloaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"
[logging]
level = "debug"

[bus]
max_fault_reports_per_listener = 3
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.bus.max_fault_reports_per_listener, Some(3));
        assert!(!config.bus.log_unlistened_events);
        assert_eq!(config.adapters, AdapterConfig::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[logging\nlevel = ").unwrap();

        let err = AppConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "warn".to_string();
        config.bus.max_fault_reports_per_listener = Some(0);
        assert!(config.validate().is_err());

        config.bus.max_fault_reports_per_listener = None;
        config.adapters.drag_buttons = 12;
        assert!(config.validate().is_err());

        config.adapters.drag_buttons = 3;
        assert!(config.validate().is_ok());
    }
}
