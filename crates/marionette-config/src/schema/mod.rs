//! Configuration schema types for Marionette.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod logging;

pub use bridge::*;
pub use logging::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Marionette.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarionetteConfig {
    pub bridge: BridgeConfig,
    pub logging: LoggingConfig,
}
