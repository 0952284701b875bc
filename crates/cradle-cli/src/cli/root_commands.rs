use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build the catalog and write it to the database.
    Seed(SeedArgs),
    /// Score one set of measurements (ppb) without touching the database.
    Score(ScoreArgs),
    /// Summarize the stored catalog.
    Stats,
}

/// Flags for `cradle seed`. Unset flags fall back to the `[seed]` config.
#[derive(Clone, Debug, Args)]
pub struct SeedArgs {
    /// Fixed master seed for a reproducible catalog
    #[arg(long)]
    pub seed: Option<u64>,
    /// Products per insert batch (1 to 1000)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub batch_size: Option<u64>,
    /// Delete existing catalog rows before seeding
    #[arg(long)]
    pub reset: bool,
    /// Skip the reference table
    #[arg(long)]
    pub no_reference: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ScoreArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lead: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub arsenic: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub cadmium: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub mercury: f64,
}
