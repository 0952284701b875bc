//! Catalog assembly: the fixed reference table plus synthesized products.

pub mod brands;
pub mod reference;
pub mod synth;
pub mod vocabulary;

use rand::Rng;

pub use brands::{BrandTarget, brand_prefix, default_brand_targets, is_organic_brand};
pub use reference::{REFERENCE_PRODUCTS, ReferenceProduct, reference_entries};
pub use synth::{CatalogSynthesizer, MAX_BARCODE_ATTEMPTS};

use crate::entities::CatalogEntry;
use crate::errors::CoreError;

/// Options for [`build_catalog`].
#[derive(Debug, Clone)]
pub struct CatalogPlan {
    pub include_reference: bool,
    pub targets: Vec<BrandTarget>,
}

impl Default for CatalogPlan {
    fn default() -> Self {
        Self {
            include_reference: true,
            targets: default_brand_targets(),
        }
    }
}

/// A built catalog and the synthesizer that tracks its barcodes.
///
/// The synthesizer is kept so callers can regenerate colliding barcodes
/// later without reusing one already in the catalog.
#[derive(Debug)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub synthesizer: CatalogSynthesizer,
}

impl Catalog {
    #[must_use]
    pub fn reference_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.product.provenance.hbbf_tested())
            .count()
    }
}

/// Reference entries first, then each brand target's synthesized products in order.
///
/// # Errors
///
/// Returns `CoreError` if a reference row is invalid, two reference barcodes
/// collide, or a brand runs out of barcodes.
pub fn build_catalog<R: Rng + ?Sized>(
    plan: &CatalogPlan,
    rng: &mut R,
) -> Result<Catalog, CoreError> {
    let mut synthesizer = CatalogSynthesizer::new();
    let mut entries = Vec::new();

    if plan.include_reference {
        for entry in reference_entries()? {
            if !synthesizer.reserve_barcode(&entry.product.barcode) {
                return Err(CoreError::Validation(format!(
                    "duplicate reference barcode {}",
                    entry.product.barcode
                )));
            }
            entries.push(entry);
        }
    }

    entries.extend(synthesizer.synthesize(&plan.targets, rng)?);

    Ok(Catalog {
        entries,
        synthesizer,
    })
}
