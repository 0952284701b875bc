use anyhow::Context;
use cradle_config::{CradleConfig, DatabaseConfig};

use crate::cli::GlobalFlags;

/// Load layered config (with `.env` support) and apply CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<CradleConfig> {
    let mut config =
        CradleConfig::load_with_dotenv().context("failed to load cradle configuration")?;
    apply_overrides(&mut config, flags);
    config
        .validate()
        .context("invalid configuration after CLI overrides")?;
    Ok(config)
}

fn apply_overrides(config: &mut CradleConfig, flags: &GlobalFlags) {
    if let Some(path) = &flags.database {
        // An explicit local file wins over any configured remote.
        config.database = DatabaseConfig {
            path: path.clone(),
            url: String::new(),
            auth_token: String::new(),
            ..config.database.clone()
        };
    }
}
