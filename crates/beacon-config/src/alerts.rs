//! Drift alert feed configuration.

use serde::{Deserialize, Serialize};

const fn default_recent_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertsConfig {
    /// Alerts loaded into a feed on `load_recent`.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}
