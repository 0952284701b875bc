//! Batch seeding of the catalog.
//!
//! A run builds the whole catalog in memory first (reference table, then
//! synthesized products per brand target), writes products in fixed-size
//! batches, and only then writes one lab result per stored product.
//!
//! Failure policy:
//! - a product batch that cannot be written aborts the run with its batch index;
//! - a barcode already present in the store triggers one regenerate-and-retry
//!   of the batch (reference barcodes are never regenerated);
//! - a lab result that cannot be written is logged, skipped, and reported in
//!   [`SeedSummary::skipped_lab_results`](cradle_core::responses::SeedSummary).

mod seeder;

use cradle_config::SeedConfig;
use cradle_core::catalog::{BrandTarget, default_brand_targets};

pub use seeder::CatalogSeeder;

/// Everything a seeding run needs besides the store.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Products per insert statement.
    pub batch_size: usize,
    pub include_reference: bool,
    /// Delete existing catalog rows first.
    pub reset: bool,
    /// Fixed master seed; `None` draws one from OS entropy.
    pub rng_seed: Option<u64>,
    pub brands: Vec<BrandTarget>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            include_reference: true,
            reset: false,
            rng_seed: None,
            brands: default_brand_targets(),
        }
    }
}

impl From<&SeedConfig> for SeedOptions {
    fn from(config: &SeedConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            include_reference: config.include_reference,
            reset: config.reset,
            rng_seed: config.rng_seed,
            brands: config.brands.clone(),
        }
    }
}

/// A master seed from the OS entropy source.
///
/// # Errors
///
/// Returns the entropy source's error message.
pub fn entropy_seed() -> Result<u64, String> {
    let mut bytes = [0u8; 8];
    getrandom::fill(&mut bytes).map_err(|e| e.to_string())?;
    Ok(u64::from_le_bytes(bytes))
}
