//! # beacon-config
//!
//! Layered configuration loading for Beacon using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`BEACON_*` prefix, `__` as separator)
//! 2. Project-level `.beacon/config.toml`
//! 3. User-level `~/.config/beacon/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `BEACON_STORE__PATH` -> `store.path`,
//! `BEACON_ANALYSIS__TREND_THRESHOLD` -> `analysis.trend_threshold`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use beacon_config::BeaconConfig;
//!
//! let config = BeaconConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//! println!("store: {}", config.store.path);
//! ```

mod alerts;
mod analysis;
mod error;
mod general;
mod store;

pub use alerts::AlertsConfig;
pub use analysis::AnalysisConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BeaconConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl BeaconConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".beacon/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("BEACON_").split("__"))
    }

    /// Reject values the analysis and feed code cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let analysis = &self.analysis;
        if analysis.window_days == 0 {
            return Err(invalid("analysis.window_days", "must be at least 1"));
        }
        if analysis.recent_days >= analysis.window_days {
            return Err(invalid(
                "analysis.recent_days",
                &format!(
                    "must be shorter than window_days ({})",
                    analysis.window_days
                ),
            ));
        }
        if !analysis.trend_threshold.is_finite() || analysis.trend_threshold < 0.0 {
            return Err(invalid(
                "analysis.trend_threshold",
                "must be a non-negative number",
            ));
        }
        if analysis.engines.is_empty() {
            return Err(invalid("analysis.engines", "at least one engine is required"));
        }
        if self.alerts.recent_limit == 0 {
            return Err(invalid("alerts.recent_limit", "must be at least 1"));
        }
        if self.store.alert_channel_capacity == 0 {
            return Err(invalid("store.alert_channel_capacity", "must be at least 1"));
        }
        if self.store.poll_interval_ms == 0 {
            return Err(invalid("store.poll_interval_ms", "must be at least 1"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("beacon").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
