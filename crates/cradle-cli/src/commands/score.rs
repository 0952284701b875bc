use anyhow::Context;
use cradle_core::entities::ContaminantLevels;
use cradle_core::scoring::score_breakdown;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScoreArgs;
use crate::output::output;

/// Handle `cradle score`.
pub fn handle(args: &ScoreArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let breakdown = score_breakdown(&levels(args)).context("cannot score these measurements")?;
    output(&breakdown, flags.format)
}

const fn levels(args: &ScoreArgs) -> ContaminantLevels {
    ContaminantLevels::new(args.lead, args.arsenic, args.cadmium, args.mercury)
}
