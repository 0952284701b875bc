//! Error types for cradle-db.

use cradle_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether the store rejected a write because of a UNIQUE constraint.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::LibSql(e) => e.to_string().contains("UNIQUE constraint failed"),
            Self::Query(msg) => msg.contains("UNIQUE constraint failed"),
            _ => false,
        }
    }
}

/// Errors that abort a seeding run.
///
/// Per-product lab result failures are not errors here; they are skipped
/// and reported in the summary.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A product batch could not be written. `batch` is 1-based.
    #[error("Product batch {batch} of {total} failed ({products} products)")]
    ProductBatch {
        batch: usize,
        total: usize,
        products: usize,
        #[source]
        source: DatabaseError,
    },

    /// A barcode collision that regeneration could not resolve.
    #[error("Unresolvable barcode collision: {0}")]
    BarcodeCollision(String),

    /// Clearing the existing catalog before seeding failed.
    #[error("Failed to reset catalog")]
    Reset(#[source] DatabaseError),

    /// The OS entropy source could not provide a master seed.
    #[error("Failed to read OS entropy for the master seed: {0}")]
    Entropy(String),

    /// Seed options that cannot run.
    #[error("Invalid seed options: {0}")]
    InvalidOptions(String),

    /// Synthesis or scoring failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_detected_from_message() {
        let err = DatabaseError::Query("UNIQUE constraint failed: products.barcode".into());
        assert!(err.is_unique_violation());
        assert!(!DatabaseError::NoResult.is_unique_violation());
    }

    #[test]
    fn product_batch_error_names_batch() {
        let err = SeedError::ProductBatch {
            batch: 3,
            total: 6,
            products: 100,
            source: DatabaseError::Query("disk I/O error".into()),
        };
        assert_eq!(err.to_string(), "Product batch 3 of 6 failed (100 products)");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "Query failed: disk I/O error");
    }
}
