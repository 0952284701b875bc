use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::lab_result::LabResult;
use crate::enums::Category;
use crate::errors::CoreError;
use crate::scoring;

/// Where a product's contaminant values came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Measured by a cited laboratory study.
    Reference { test_year: i32 },
    /// Estimated; `rng_seed` regenerates every random choice made for it.
    Synthesized { rng_seed: u64 },
}

impl Provenance {
    /// Whether values come from the 2019 Healthy Babies Bright Futures testing.
    #[must_use]
    pub const fn hbbf_tested(self) -> bool {
        matches!(self, Self::Reference { .. })
    }

    #[must_use]
    pub const fn test_year(self) -> Option<i32> {
        match self {
            Self::Reference { test_year } => Some(test_year),
            Self::Synthesized { .. } => None,
        }
    }

    #[must_use]
    pub const fn rng_seed(self) -> Option<u64> {
        match self {
            Self::Synthesized { rng_seed } => Some(rng_seed),
            Self::Reference { .. } => None,
        }
    }
}

/// A retail baby-food item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub barcode: String,
    pub description: String,
    pub is_organic: bool,
    pub provenance: Provenance,
}

/// A product together with the lab result that scores it.
///
/// The overall score is never stored here; it is always derived from the
/// lab result's four concentrations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CatalogEntry {
    pub product: Product,
    pub lab_result: LabResult,
}

impl CatalogEntry {
    /// Safety score in `[0, 100]` for this entry's lab result.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidMeasurement` if the lab result holds an invalid level.
    pub fn overall_score(&self) -> Result<u8, CoreError> {
        scoring::compute_safety_score(&self.lab_result.levels)
    }
}
