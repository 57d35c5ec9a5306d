use serde::{Deserialize, Serialize};

/// Tuning for the remote object bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Pending operations that trigger an automatic flush (0 = flush only
    /// on an explicit barrier; valid range: 0-10000).
    pub flush_threshold: u32,
    /// Prefix for generated object identities.
    pub id_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            flush_threshold: 0,
            id_prefix: "$".into(),
        }
    }
}
