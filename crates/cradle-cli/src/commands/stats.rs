use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cradle stats`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = ctx
        .db
        .catalog_stats()
        .await
        .context("failed to read catalog statistics")?;
    output(&stats, flags.format)
}
