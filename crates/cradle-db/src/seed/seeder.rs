use std::collections::HashMap;
use std::time::Instant;

use cradle_config::MAX_BATCH_SIZE;
use cradle_core::catalog::{Catalog, CatalogPlan, CatalogSynthesizer, build_catalog};
use cradle_core::entities::CatalogEntry;
use cradle_core::errors::CoreError;
use cradle_core::responses::SeedSummary;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use super::{SeedOptions, entropy_seed};
use crate::error::{DatabaseError, SeedError};
use crate::store::{CatalogStore, ScoredProduct};

/// Runs one seeding pass against a [`CatalogStore`].
pub struct CatalogSeeder<'a, S> {
    store: &'a S,
    options: SeedOptions,
}

/// Position of a batch within the run, carried into errors and logs.
#[derive(Debug, Clone, Copy)]
struct BatchPosition {
    batch: usize,
    total: usize,
    products: usize,
}

impl BatchPosition {
    fn fail(self, source: DatabaseError) -> SeedError {
        error!(
            batch = self.batch,
            total = self.total,
            products = self.products,
            error = %source,
            "product batch failed, aborting"
        );
        SeedError::ProductBatch {
            batch: self.batch,
            total: self.total,
            products: self.products,
            source,
        }
    }
}

fn collision_error(e: CoreError) -> SeedError {
    match e {
        CoreError::BarcodeExhausted { .. } => SeedError::BarcodeCollision(e.to_string()),
        other => SeedError::Core(other),
    }
}

fn score_batch(batch: &[CatalogEntry]) -> Result<Vec<ScoredProduct<'_>>, CoreError> {
    batch
        .iter()
        .map(|entry| {
            Ok(ScoredProduct {
                product: &entry.product,
                overall_score: entry.overall_score()?,
            })
        })
        .collect()
}

impl<'a, S: CatalogStore> CatalogSeeder<'a, S> {
    #[must_use]
    pub const fn new(store: &'a S, options: SeedOptions) -> Self {
        Self { store, options }
    }

    /// Seed with the configured master seed, or a fresh one from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if entropy is unavailable or the run aborts.
    pub async fn run(&self) -> Result<SeedSummary, SeedError> {
        let master_seed = match self.options.rng_seed {
            Some(seed) => seed,
            None => entropy_seed().map_err(SeedError::Entropy)?,
        };
        self.run_with_seed(master_seed).await
    }

    /// Seed using `master_seed` for every random choice.
    ///
    /// # Errors
    ///
    /// Returns `SeedError` if the options are invalid, the reset fails, a
    /// product batch cannot be written, or a barcode collision cannot be resolved.
    pub async fn run_with_seed(&self, master_seed: u64) -> Result<SeedSummary, SeedError> {
        let batch_size = self.options.batch_size;
        if !(1..=MAX_BATCH_SIZE).contains(&batch_size) {
            return Err(SeedError::InvalidOptions(format!(
                "batch size must be between 1 and {MAX_BATCH_SIZE}, got {batch_size}"
            )));
        }

        let started = Instant::now();
        info!(master_seed, batch_size, "seeding catalog");

        if self.options.reset {
            self.store.reset_catalog().await.map_err(SeedError::Reset)?;
        }

        let mut rng = StdRng::seed_from_u64(master_seed);
        let plan = CatalogPlan {
            include_reference: self.options.include_reference,
            targets: self.options.brands.clone(),
        };
        let Catalog {
            mut entries,
            mut synthesizer,
        } = build_catalog(&plan, &mut rng).map_err(collision_error)?;

        let mut summary = SeedSummary {
            master_seed,
            barcodes_regenerated: synthesizer.regenerated(),
            ..SeedSummary::default()
        };

        let total = entries.len().div_ceil(batch_size);
        let mut product_ids = Vec::with_capacity(entries.len());
        for (index, batch) in entries.chunks_mut(batch_size).enumerate() {
            let position = BatchPosition {
                batch: index + 1,
                total,
                products: batch.len(),
            };
            let ids = self
                .insert_batch(batch, position, &mut synthesizer, &mut rng, &mut summary)
                .await?;
            product_ids.extend(ids);
            summary.batches += 1;
            info!(
                batch = position.batch,
                total,
                products = position.products,
                "product batch inserted"
            );
        }

        for entry in &entries {
            summary.products += 1;
            if entry.product.provenance.hbbf_tested() {
                summary.reference_products += 1;
            } else {
                summary.synthesized_products += 1;
            }
            *summary
                .by_brand
                .entry(entry.product.brand.clone())
                .or_default() += 1;
            *summary
                .by_category
                .entry(entry.product.category.as_str().to_string())
                .or_default() += 1;
        }

        for (entry, product_id) in entries.iter().zip(&product_ids) {
            match self
                .store
                .insert_lab_result(product_id, &entry.lab_result)
                .await
            {
                Ok(lab_result_id) => {
                    debug!(product = %entry.product.name, %lab_result_id, "lab result inserted");
                    summary.lab_results += 1;
                    summary.contaminants += 4;
                }
                Err(e) => {
                    warn!(
                        product = %entry.product.name,
                        barcode = %entry.product.barcode,
                        error = %e,
                        "skipping lab result"
                    );
                    summary.skipped_lab_results.push(entry.product.name.clone());
                }
            }
        }

        summary.duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            products = summary.products,
            lab_results = summary.lab_results,
            contaminants = summary.contaminants,
            skipped = summary.skipped_lab_results.len(),
            duration_ms = summary.duration_ms,
            "catalog seeded"
        );
        Ok(summary)
    }

    /// Insert one batch, retrying once after regenerating barcodes the store
    /// already holds. Returns product ids aligned with `batch`.
    async fn insert_batch(
        &self,
        batch: &mut [CatalogEntry],
        position: BatchPosition,
        synthesizer: &mut CatalogSynthesizer,
        rng: &mut StdRng,
        summary: &mut SeedSummary,
    ) -> Result<Vec<String>, SeedError> {
        let first_attempt = {
            let scored = score_batch(batch)?;
            self.store.insert_product_batch(&scored).await
        };

        let inserted = match first_attempt {
            Ok(inserted) => inserted,
            Err(e) if e.is_unique_violation() => {
                warn!(batch = position.batch, error = %e, "barcode collision in batch");
                self.regenerate_stored_barcodes(batch, position, e, synthesizer, rng, summary)
                    .await?;
                let scored = score_batch(batch)?;
                self.store
                    .insert_product_batch(&scored)
                    .await
                    .map_err(|e| position.fail(e))?
            }
            Err(e) => return Err(position.fail(e)),
        };

        let mut ids: HashMap<String, String> = inserted
            .into_iter()
            .map(|row| (row.barcode, row.id))
            .collect();
        batch
            .iter()
            .map(|entry| {
                ids.remove(&entry.product.barcode).ok_or_else(|| {
                    position.fail(DatabaseError::InvalidState(format!(
                        "no id returned for barcode {}",
                        entry.product.barcode
                    )))
                })
            })
            .collect()
    }

    async fn regenerate_stored_barcodes(
        &self,
        batch: &mut [CatalogEntry],
        position: BatchPosition,
        violation: DatabaseError,
        synthesizer: &mut CatalogSynthesizer,
        rng: &mut StdRng,
        summary: &mut SeedSummary,
    ) -> Result<(), SeedError> {
        let existing = {
            let barcodes: Vec<&str> = batch.iter().map(|e| e.product.barcode.as_str()).collect();
            self.store
                .existing_barcodes(&barcodes)
                .await
                .map_err(|e| position.fail(e))?
        };
        if existing.is_empty() {
            return Err(position.fail(violation));
        }

        for entry in batch
            .iter_mut()
            .filter(|e| existing.contains(&e.product.barcode))
        {
            if entry.product.provenance.hbbf_tested() {
                return Err(SeedError::BarcodeCollision(format!(
                    "reference product '{}' has barcode {} which is already stored",
                    entry.product.name, entry.product.barcode
                )));
            }
            let previous = entry.product.barcode.clone();
            synthesizer
                .regenerate_barcode(entry, rng)
                .map_err(collision_error)?;
            summary.barcodes_regenerated += 1;
            warn!(
                product = %entry.product.name,
                %previous,
                barcode = %entry.product.barcode,
                "regenerated colliding barcode"
            );
        }
        Ok(())
    }
}
