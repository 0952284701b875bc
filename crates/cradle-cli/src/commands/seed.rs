use anyhow::Context;
use cradle_db::seed::{CatalogSeeder, SeedOptions};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SeedArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `cradle seed`.
pub async fn handle(
    args: &SeedArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let options = seed_options(args, ctx)?;
    let expected = options.brands.iter().map(|t| u64::from(t.count)).sum::<u64>();

    let progress = Progress::spinner(&format!(
        "seeding {expected} synthesized products in batches of {}",
        options.batch_size
    ));
    let seeder = CatalogSeeder::new(&ctx.db, options);
    let summary = match seeder.run().await {
        Ok(summary) => summary,
        Err(error) => {
            progress.finish_err("seeding failed");
            return Err(error).context("catalog seeding aborted");
        }
    };
    progress.finish_ok(&format!(
        "seeded {} products in {} ms",
        summary.products, summary.duration_ms
    ));

    if !summary.skipped_lab_results.is_empty() {
        tracing::warn!(
            skipped = summary.skipped_lab_results.len(),
            "some lab results were not written; see skipped_lab_results"
        );
    }

    output(&summary, flags.format)
}

/// `[seed]` config with CLI flags layered on top.
fn seed_options(args: &SeedArgs, ctx: &AppContext) -> anyhow::Result<SeedOptions> {
    let mut options = SeedOptions::from(&ctx.config.seed);
    if let Some(seed) = args.seed {
        options.rng_seed = Some(seed);
    }
    if let Some(batch_size) = args.batch_size {
        options.batch_size =
            usize::try_from(batch_size).context("--batch-size does not fit this platform")?;
    }
    if args.reset {
        options.reset = true;
    }
    if args.no_reference {
        options.include_reference = false;
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use cradle_config::CradleConfig;
    use cradle_core::catalog::BrandTarget;
    use pretty_assertions::assert_eq;

    use super::{handle, seed_options};
    use crate::cli::root_commands::SeedArgs;
    use crate::cli::{GlobalFlags, OutputFormat};
    use crate::context::AppContext;

    async fn context() -> AppContext {
        let mut config = CradleConfig::default();
        config.database.path = ":memory:".into();
        config.seed.brands = vec![
            BrandTarget::new("Gerber", 3),
            BrandTarget::new("Plum Organics", 2),
        ];
        AppContext::init(config).await.expect("in-memory context")
    }

    fn no_flags() -> SeedArgs {
        SeedArgs {
            seed: None,
            batch_size: None,
            reset: false,
            no_reference: false,
        }
    }

    fn flags() -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Raw,
            quiet: true,
            verbose: false,
            database: None,
        }
    }

    #[tokio::test]
    async fn options_come_from_config_without_flags() {
        let ctx = context().await;
        let options = seed_options(&no_flags(), &ctx).unwrap();

        assert_eq!(options.batch_size, 100);
        assert!(options.include_reference);
        assert!(!options.reset);
        assert_eq!(options.rng_seed, None);
        assert_eq!(options.brands.len(), 2);
    }

    #[tokio::test]
    async fn flags_override_config() {
        let ctx = context().await;
        let args = SeedArgs {
            seed: Some(7),
            batch_size: Some(4),
            reset: true,
            no_reference: true,
        };
        let options = seed_options(&args, &ctx).unwrap();

        assert_eq!(options.rng_seed, Some(7));
        assert_eq!(options.batch_size, 4);
        assert!(options.reset);
        assert!(!options.include_reference);
    }

    #[tokio::test]
    async fn seed_then_stats_reads_back_the_catalog() {
        let ctx = context().await;
        let args = SeedArgs {
            seed: Some(42),
            ..no_flags()
        };
        handle(&args, &ctx, &flags()).await.expect("seed should succeed");

        let stats = ctx.db.catalog_stats().await.unwrap();
        assert_eq!(stats.products, 25);
        assert_eq!(stats.lab_results, 25);
        assert_eq!(stats.contaminants, 100);
    }

    #[tokio::test]
    async fn reseeding_without_reset_fails_with_context() {
        let ctx = context().await;
        handle(&no_flags(), &ctx, &flags()).await.unwrap();

        let err = handle(&no_flags(), &ctx, &flags()).await.unwrap_err();
        assert!(format!("{err:#}").contains("catalog seeding aborted"));

        let args = SeedArgs {
            reset: true,
            ..no_flags()
        };
        handle(&args, &ctx, &flags()).await.expect("reset reseeds");
        assert_eq!(ctx.db.catalog_stats().await.unwrap().products, 25);
    }
}
