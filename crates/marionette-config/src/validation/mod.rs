//! Full configuration validation.
//!
//! Each section has its own check; this orchestrator runs them all and
//! collects errors into a single `ConfigError`.

mod bridge;
mod helpers;


use crate::schema::MarionetteConfig;
use marionette_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MarionetteConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    bridge::validate_bridge(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
