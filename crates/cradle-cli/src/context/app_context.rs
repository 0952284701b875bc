use anyhow::Context;
use cradle_config::CradleConfig;
use cradle_db::CradleDb;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub db: CradleDb,
    pub config: CradleConfig,
}

impl AppContext {
    /// Open the configured database (local file or remote) and run migrations.
    pub async fn init(config: CradleConfig) -> anyhow::Result<Self> {
        let target = if config.database.is_remote() {
            config.database.url.clone()
        } else {
            config.database.path.clone()
        };

        let db = CradleDb::open(&config.database)
            .await
            .with_context(|| format!("failed to open catalog database at {target}"))?;

        tracing::debug!(%target, remote = db.is_remote(), "catalog database ready");
        Ok(Self { db, config })
    }
}
