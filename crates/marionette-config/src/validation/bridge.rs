use crate::schema::MarionetteConfig;

use super::helpers::validate_range;

/// Validate bridge tuning.
pub(crate) fn validate_bridge(errors: &mut Vec<String>, config: &MarionetteConfig) {
    validate_range(
        errors,
        "bridge.flush_threshold",
        config.bridge.flush_threshold,
        0,
        10_000,
    );

    let prefix = &config.bridge.id_prefix;
    if prefix.is_empty() {
        errors.push("bridge.id_prefix must not be empty".into());
    } else if prefix.chars().any(char::is_whitespace) {
        errors.push(format!("bridge.id_prefix = {prefix:?} contains whitespace"));
    }
}
