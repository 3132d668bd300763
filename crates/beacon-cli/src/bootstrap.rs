use std::path::Path;

use anyhow::Context;
use beacon_config::BeaconConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, layered config, then apply command-line overrides and validate.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<BeaconConfig> {
    load_project_dotenv()?;

    let mut config = BeaconConfig::load()?;
    apply_overrides(&mut config, flags);
    config.validate()?;
    Ok(config)
}

/// `--user` and `--db` win over every configured source.
fn apply_overrides(config: &mut BeaconConfig, flags: &GlobalFlags) {
    if let Some(user) = flags.user.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        config.general.user_id = user.to_string();
    }
    if let Some(db) = flags.db.as_deref().filter(|p| !p.is_empty()) {
        config.store.path = db.to_string();
    }
}

fn load_project_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    for candidate in [cwd.join(".beacon").join(".env"), cwd.join(".env")] {
        if candidate.exists() {
            return load_dotenv_file(&candidate);
        }
    }
    Ok(())
}

fn load_dotenv_file(path: &Path) -> anyhow::Result<()> {
    dotenvy::from_path(path)
        .with_context(|| format!("failed to load dotenv file at {}", path.display()))
}
