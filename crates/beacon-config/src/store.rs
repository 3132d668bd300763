//! Citation store configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".beacon/beacon.db".to_string()
}

/// Default capacity of the in-process alert insert channel.
const fn default_alert_channel_capacity() -> usize {
    64
}

/// Default interval between cross-process alert polls, in milliseconds.
const fn default_poll_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// libSQL database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// Inserts buffered per subscriber before it starts lagging.
    #[serde(default = "default_alert_channel_capacity")]
    pub alert_channel_capacity: usize,

    /// How often `alerts watch` checks for alerts written by other processes.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            alert_channel_capacity: default_alert_channel_capacity(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
