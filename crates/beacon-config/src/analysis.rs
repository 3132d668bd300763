//! Share and trend analysis configuration.

use beacon_core::enums::Engine;
use serde::{Deserialize, Serialize};

const fn default_window_days() -> u32 {
    7
}

const fn default_recent_days() -> u32 {
    3
}

/// Minimum share change, in percentage points, that counts as a trend.
const fn default_trend_threshold() -> f64 {
    5.0
}

fn default_engines() -> Vec<Engine> {
    Engine::ALL.to_vec()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Trailing window fetched for share computation.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Citations newer than this many days form the "recent" trend bucket.
    #[serde(default = "default_recent_days")]
    pub recent_days: u32,

    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,

    /// Engines reported, in display order.
    #[serde(default = "default_engines")]
    pub engines: Vec<Engine>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            recent_days: default_recent_days(),
            trend_threshold: default_trend_threshold(),
            engines: default_engines(),
        }
    }
}
