use std::path::Path;

use anyhow::Context;
use beacon_config::{BeaconConfig, ConfigError};
use beacon_core::identity::AuthIdentity;
use beacon_db::service::BeaconStore;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub store: BeaconStore,
    pub config: BeaconConfig,
    pub identity: AuthIdentity,
}

impl AppContext {
    /// Resolve the acting user and open the store.
    pub async fn init(config: BeaconConfig) -> anyhow::Result<Self> {
        let identity = resolve_identity(&config)?;

        if !config.store.is_in_memory() {
            ensure_parent_dir(Path::new(&config.store.path))?;
        }
        let store = BeaconStore::new_local(&config.store.path, config.store.alert_channel_capacity)
            .await
            .with_context(|| format!("failed to open citation store at {}", config.store.path))?;

        tracing::debug!(user_id = %identity.user_id, path = %config.store.path, "application context ready");
        Ok(Self {
            store,
            config,
            identity,
        })
    }

    /// Limit precedence: global `--limit`, then `general.default_limit`.
    #[must_use]
    pub fn limit(&self, global: Option<u32>) -> u32 {
        global.unwrap_or(self.config.general.default_limit)
    }
}

fn resolve_identity(config: &BeaconConfig) -> Result<AuthIdentity, ConfigError> {
    if !config.general.has_user() {
        return Err(ConfigError::NotConfigured {
            field: "general.user_id (or pass --user)".to_string(),
        });
    }
    Ok(AuthIdentity::new(config.general.user_id.trim()))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display())),
        _ => Ok(()),
    }
}
