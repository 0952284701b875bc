//! Cross-cutting error types for Cradle.
//!
//! Domain-specific errors (`DatabaseError`, `SeedError`, `ConfigError`) are
//! defined in their respective crates. The binary converges everything into
//! `anyhow::Error`.

use thiserror::Error;

use crate::enums::Metal;

/// Errors that can be raised by the scoring and synthesis core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A contaminant concentration was negative, NaN, or infinite.
    #[error("Invalid {metal} measurement: {value} ppb (must be a finite, non-negative number)")]
    InvalidMeasurement { metal: Metal, value: f64 },

    /// No unused barcode could be generated for a brand.
    #[error("Could not generate a unique barcode for {brand} after {attempts} attempts")]
    BarcodeExhausted { brand: String, attempts: u32 },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
