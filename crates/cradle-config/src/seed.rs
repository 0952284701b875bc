//! Catalog seeding configuration.

use cradle_core::catalog::{BrandTarget, default_brand_targets};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Largest accepted batch. Each product binds 10 parameters, and SQLite caps
/// a statement at 32766 of them.
pub const MAX_BATCH_SIZE: usize = 1000;

const fn default_batch_size() -> usize {
    100
}

const fn default_include_reference() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    /// Products written per multi-row insert.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Insert the fixed reference table before synthesized products.
    #[serde(default = "default_include_reference")]
    pub include_reference: bool,

    /// Delete existing catalog rows before seeding.
    #[serde(default)]
    pub reset: bool,

    /// Fixed master seed. Unset means a fresh seed from OS entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Synthesized products per brand, generated in this order.
    #[serde(default = "default_brand_targets")]
    pub brands: Vec<BrandTarget>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            include_reference: default_include_reference(),
            reset: false,
            rng_seed: None,
            brands: default_brand_targets(),
        }
    }
}

impl SeedConfig {
    /// Synthesized products the brand targets add up to.
    #[must_use]
    pub fn synthesized_total(&self) -> u64 {
        self.brands.iter().map(|t| u64::from(t.count)).sum()
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a batch size outside
    /// `1..=MAX_BATCH_SIZE` or a blank brand name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::invalid("seed.batch_size", "must be at least 1"));
        }
        if self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::invalid(
                "seed.batch_size",
                format!("must be at most {MAX_BATCH_SIZE}"),
            ));
        }
        if let Some(target) = self.brands.iter().find(|t| t.brand.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "seed.brands",
                format!("brand name must not be blank (count {})", target.count),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SeedConfig::default();
        assert_eq!(config.batch_size, 100);
        assert!(config.include_reference);
        assert!(!config.reset);
        assert!(config.rng_seed.is_none());
        assert_eq!(config.synthesized_total(), 505);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_batch_size_rejected() {
        let config = SeedConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn batch_size_capped_at_max() {
        let at_cap = SeedConfig {
            batch_size: MAX_BATCH_SIZE,
            ..Default::default()
        };
        assert!(at_cap.validate().is_ok());

        let over = SeedConfig {
            batch_size: MAX_BATCH_SIZE + 1,
            ..Default::default()
        };
        let err = over.validate().unwrap_err();
        assert!(err.to_string().contains("seed.batch_size"), "{err}");
    }

    #[test]
    fn blank_brand_rejected() {
        let config = SeedConfig {
            brands: vec![BrandTarget::new("  ", 3)],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
