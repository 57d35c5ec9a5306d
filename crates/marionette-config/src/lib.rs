//! Marionette configuration system.
//!
//! Provides TOML-based configuration for the bridge and logging. All
//! sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use marionette_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{BridgeConfig, LogLevel, LoggingConfig, MarionetteConfig, CONFIG_SCHEMA_VERSION};

use marionette_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path and validate it.
///
/// Creates a default `config.toml` if none exists.
pub fn load_config() -> Result<MarionetteConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<MarionetteConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &MarionetteConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = MarionetteConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"bridge\""));
        assert!(json.contains("\"logging\""));
        assert!(json.contains("\"flush_threshold\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = MarionetteConfig::default();
        let json = config_to_json(&config);
        let parsed: MarionetteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.bridge.id_prefix, "$");
        assert_eq!(parsed.bridge.flush_threshold, 0);
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bridge]\nflush_threshold = 999999\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
