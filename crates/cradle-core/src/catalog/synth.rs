//! Synthesized catalog entries.
//!
//! Every synthesized product draws a 64-bit seed from the caller's generator
//! and makes all of its own random choices from a `StdRng` seeded with it,
//! so the seed stored on the product is enough to regenerate it. The barcode
//! is drawn last, so a collision retry changes only the barcode.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::catalog::brands::{BrandTarget, brand_prefix, is_organic_brand};
use crate::catalog::vocabulary::{NameTemplate, ingredients, product_name};
use crate::entities::{CatalogEntry, LabResult, Product, Provenance, SYNTHESIZED_LAB_NAME};
use crate::enums::Category;
use crate::errors::CoreError;
use crate::estimate::estimate_contaminants;

/// Attempts at finding an unused barcode suffix before giving up.
pub const MAX_BARCODE_ATTEMPTS: u32 = 32;

/// First and last day (inclusive) synthesized lab dates fall in.
const TEST_WINDOW_START: (i32, u32, u32) = (2023, 1, 1);
const TEST_WINDOW_END: (i32, u32, u32) = (2025, 12, 31);

/// Pick a category according to [`Category::selection_weight`].
pub fn pick_category<R: Rng + ?Sized>(rng: &mut R) -> Category {
    let mut roll = rng.random_range(0..100u32);
    for category in Category::ALL {
        let weight = category.selection_weight();
        if roll < weight {
            return category;
        }
        roll -= weight;
    }
    Category::Puree
}

/// Twelve-digit barcode: brand prefix plus a random six-digit suffix.
pub fn random_barcode<R: Rng + ?Sized>(brand: &str, rng: &mut R) -> String {
    format!("{}{:06}", brand_prefix(brand), rng.random_range(0..1_000_000u32))
}

fn date(ymd: (i32, u32, u32)) -> Result<NaiveDate, CoreError> {
    let (year, month, day) = ymd;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CoreError::Validation(format!("invalid date {year}-{month}-{day}")))
}

/// A uniformly random day in the synthesized test window.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the window constants are invalid.
pub fn random_test_date<R: Rng + ?Sized>(rng: &mut R) -> Result<NaiveDate, CoreError> {
    let start = date(TEST_WINDOW_START)?;
    let end = date(TEST_WINDOW_END)?;
    let span = u64::try_from((end - start).num_days())
        .map_err(|_| CoreError::Validation("test window ends before it starts".into()))?;
    start
        .checked_add_days(Days::new(rng.random_range(0..=span)))
        .ok_or_else(|| CoreError::Validation("test date out of range".into()))
}

/// Builds synthesized entries while keeping barcodes unique across the catalog.
#[derive(Debug, Default)]
pub struct CatalogSynthesizer {
    taken: HashSet<String>,
    regenerated: u32,
}

impl CatalogSynthesizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a barcode as used. Returns `false` if it was already taken.
    pub fn reserve_barcode(&mut self, barcode: &str) -> bool {
        self.taken.insert(barcode.to_string())
    }

    /// Number of barcodes replaced because of a collision.
    #[must_use]
    pub const fn regenerated(&self) -> u32 {
        self.regenerated
    }

    /// Synthesize one product for `brand`, drawing its seed from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::BarcodeExhausted` if no unused barcode could be found.
    pub fn synthesize_product<R: Rng + ?Sized>(
        &mut self,
        brand: &str,
        rng: &mut R,
    ) -> Result<CatalogEntry, CoreError> {
        let seed = rng.random::<u64>();
        self.synthesize_seeded(brand, seed)
    }

    /// Synthesize the product identified by `seed`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::BarcodeExhausted` if no unused barcode could be found.
    pub fn synthesize_seeded(&mut self, brand: &str, seed: u64) -> Result<CatalogEntry, CoreError> {
        let mut rng = StdRng::seed_from_u64(seed);

        let category = pick_category(&mut rng);
        let ingredient = ingredients(category)
            .choose(&mut rng)
            .copied()
            .ok_or_else(|| CoreError::Validation(format!("no ingredients for {category}")))?;
        let stage = if category.uses_stage_labels() && rng.random_bool(0.5) {
            Some(rng.random_range(1..=3u8))
        } else {
            None
        };
        let template = NameTemplate::ALL
            .choose(&mut rng)
            .copied()
            .unwrap_or(NameTemplate::Plain);

        let name = product_name(brand, stage, template, ingredient);
        let is_organic = template.is_organic() || is_organic_brand(brand);
        let levels = estimate_contaminants(category, ingredient, is_organic, &mut rng);
        let test_date = random_test_date(&mut rng)?;
        // Last draw: collision retries consume a variable number of values.
        let barcode = self.unique_barcode(brand, &mut rng)?;

        Ok(CatalogEntry {
            product: Product {
                description: format!(
                    "{brand} {category} built around {ingredient}. Contaminant levels are \
                     estimated from category and ingredient risk, not laboratory tested."
                ),
                name,
                brand: brand.to_string(),
                category,
                barcode,
                is_organic,
                provenance: Provenance::Synthesized { rng_seed: seed },
            },
            lab_result: LabResult::new(SYNTHESIZED_LAB_NAME, test_date, None, levels)?,
        })
    }

    /// Replace a synthesized entry's barcode with a fresh unused one.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for reference entries, whose barcodes are
    /// real, and `CoreError::BarcodeExhausted` if no unused barcode is found.
    pub fn regenerate_barcode<R: Rng + ?Sized>(
        &mut self,
        entry: &mut CatalogEntry,
        rng: &mut R,
    ) -> Result<(), CoreError> {
        if entry.product.provenance.hbbf_tested() {
            return Err(CoreError::Validation(format!(
                "reference barcode {} for '{}' cannot be regenerated",
                entry.product.barcode, entry.product.name
            )));
        }
        let fresh = self.unique_barcode(&entry.product.brand, rng)?;
        entry.product.barcode = fresh;
        Ok(())
    }

    /// Synthesize `count` products per target, in target order.
    ///
    /// # Errors
    ///
    /// Returns the first `CoreError` raised while synthesizing.
    pub fn synthesize<R: Rng + ?Sized>(
        &mut self,
        targets: &[BrandTarget],
        rng: &mut R,
    ) -> Result<Vec<CatalogEntry>, CoreError> {
        let total = targets.iter().map(|t| t.count as usize).sum();
        let mut entries = Vec::with_capacity(total);
        for target in targets {
            for _ in 0..target.count {
                entries.push(self.synthesize_product(&target.brand, rng)?);
            }
        }
        Ok(entries)
    }

    fn unique_barcode<R: Rng + ?Sized>(
        &mut self,
        brand: &str,
        rng: &mut R,
    ) -> Result<String, CoreError> {
        for attempt in 0..MAX_BARCODE_ATTEMPTS {
            let barcode = random_barcode(brand, rng);
            if self.taken.insert(barcode.clone()) {
                if attempt > 0 {
                    self.regenerated += 1;
                }
                return Ok(barcode);
            }
        }
        Err(CoreError::BarcodeExhausted {
            brand: brand.to_string(),
            attempts: MAX_BARCODE_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::brands::UNKNOWN_BRAND_PREFIX;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn barcodes_are_unique_and_prefixed() {
        let mut synth = CatalogSynthesizer::new();
        let entries = synth
            .synthesize(&[BrandTarget::new("Gerber", 300)], &mut rng(1))
            .unwrap();
        let unique: HashSet<_> = entries.iter().map(|e| e.product.barcode.clone()).collect();
        assert_eq!(unique.len(), 300);
        for entry in &entries {
            assert_eq!(entry.product.barcode.len(), 12);
            assert!(entry.product.barcode.starts_with("015000"));
            assert!(entry.product.barcode.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn unknown_brand_uses_zero_prefix() {
        let mut synth = CatalogSynthesizer::new();
        let entry = synth.synthesize_product("TestBrand", &mut rng(2)).unwrap();
        assert!(entry.product.barcode.starts_with(UNKNOWN_BRAND_PREFIX));
        assert!(entry.product.name.starts_with("TestBrand "));
    }

    #[test]
    fn same_master_seed_gives_same_catalog() {
        let targets = [BrandTarget::new("Gerber", 20), BrandTarget::new("Happy Baby", 10)];
        let a = CatalogSynthesizer::new()
            .synthesize(&targets, &mut rng(99))
            .unwrap();
        let b = CatalogSynthesizer::new()
            .synthesize(&targets, &mut rng(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn product_regenerates_from_recorded_seed() {
        let original = CatalogSynthesizer::new()
            .synthesize_product("Beech-Nut", &mut rng(5))
            .unwrap();
        let seed = original.product.provenance.rng_seed().unwrap();
        let again = CatalogSynthesizer::new()
            .synthesize_seeded("Beech-Nut", seed)
            .unwrap();
        assert_eq!(original, again);
    }

    #[test]
    fn stage_labels_only_for_puree_and_meal() {
        let entries = CatalogSynthesizer::new()
            .synthesize(&[BrandTarget::new("Gerber", 400)], &mut rng(8))
            .unwrap();
        for entry in &entries {
            if entry.product.name.contains(" Stage ") {
                assert!(
                    entry.product.category.uses_stage_labels(),
                    "{} is {}",
                    entry.product.name,
                    entry.product.category
                );
            }
        }
    }

    #[test]
    fn category_mix_tracks_weights() {
        let mut r = rng(12);
        let mut counts: HashMap<Category, u32> = HashMap::new();
        for _ in 0..10_000 {
            *counts.entry(pick_category(&mut r)).or_default() += 1;
        }
        for category in Category::ALL {
            let expected = category.selection_weight() * 100;
            let actual = counts.get(&category).copied().unwrap_or_default();
            assert!(
                actual.abs_diff(expected) < 300,
                "{category}: expected ~{expected}, got {actual}"
            );
        }
    }

    #[test]
    fn organic_brand_or_template_marks_organic() {
        let entries = CatalogSynthesizer::new()
            .synthesize(
                &[BrandTarget::new("Earth's Best", 50), BrandTarget::new("Gerber", 200)],
                &mut rng(21),
            )
            .unwrap();
        for entry in &entries {
            let product = &entry.product;
            let expected = product.brand == "Earth's Best" || product.name.contains("Organic ");
            assert_eq!(product.is_organic, expected, "{}", product.name);
        }
    }

    #[test]
    fn synthesized_lab_results_fall_in_window() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let entries = CatalogSynthesizer::new()
            .synthesize(&[BrandTarget::new("Plum Organics", 200)], &mut rng(4))
            .unwrap();
        for entry in &entries {
            let lab = &entry.lab_result;
            assert!(lab.test_date >= start && lab.test_date <= end);
            assert_eq!(lab.lab_name, SYNTHESIZED_LAB_NAME);
            assert!(lab.report_url.is_none());
            assert!(entry.overall_score().unwrap() <= 100);
        }
    }

    #[test]
    fn reserved_barcode_forces_regeneration() {
        let seed = 77;
        let first = CatalogSynthesizer::new()
            .synthesize_seeded("Gerber", seed)
            .unwrap();

        let mut synth = CatalogSynthesizer::new();
        assert!(synth.reserve_barcode(&first.product.barcode));
        let second = synth.synthesize_seeded("Gerber", seed).unwrap();

        assert_ne!(second.product.barcode, first.product.barcode);
        assert_eq!(second.product.name, first.product.name);
        assert_eq!(second.product.category, first.product.category);
        assert_eq!(second.lab_result, first.lab_result);
        assert_eq!(synth.regenerated(), 1);
    }

    #[test]
    fn regenerate_barcode_rejects_reference_entries() {
        let mut entry = crate::catalog::reference_entries().unwrap().remove(0);
        let err = CatalogSynthesizer::new()
            .regenerate_barcode(&mut entry, &mut rng(1))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn regenerate_barcode_replaces_synthesized_barcode() {
        let mut synth = CatalogSynthesizer::new();
        let mut entry = synth.synthesize_product("Gerber", &mut rng(3)).unwrap();
        let before = entry.product.barcode.clone();
        synth.regenerate_barcode(&mut entry, &mut rng(4)).unwrap();
        assert_ne!(entry.product.barcode, before);
        assert!(entry.product.barcode.starts_with("015000"));
    }

    #[test]
    fn collided_product_keeps_levels_from_its_seed() {
        let mut synth = CatalogSynthesizer::new();
        let mut taken = Vec::new();
        let mut master = rng(31);
        for _ in 0..3 {
            let entry = synth.synthesize_product("Gerber", &mut master).unwrap();
            taken.push(entry.product.barcode);
        }

        let seed = 77;
        let fresh = CatalogSynthesizer::new()
            .synthesize_seeded("Gerber", seed)
            .unwrap();
        assert!(synth.reserve_barcode(&fresh.product.barcode));
        let collided = synth.synthesize_seeded("Gerber", seed).unwrap();

        assert!(!taken.contains(&collided.product.barcode));
        assert_eq!(collided.lab_result, fresh.lab_result);
        assert_eq!(collided.product.description, fresh.product.description);
        assert_eq!(collided.product.is_organic, fresh.product.is_organic);
    }
}
