//! The persistence seam the seeder writes through.
//!
//! `CradleDb` is the production implementation. Tests wrap it to inject
//! failures without touching the seeding logic.

use std::collections::HashSet;

use cradle_core::entities::{LabResult, Product};

use crate::CradleDb;
use crate::error::DatabaseError;

/// A product ready to persist, with its score already computed.
#[derive(Debug, Clone, Copy)]
pub struct ScoredProduct<'a> {
    pub product: &'a Product,
    pub overall_score: u8,
}

/// Generated id of an inserted product, keyed by its unique barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertedProduct {
    pub id: String,
    pub barcode: String,
}

/// Writes the seeder needs from a catalog store.
#[allow(async_fn_in_trait)]
pub trait CatalogStore {
    /// Insert all products atomically and return their generated ids.
    /// Order of the returned rows is unspecified.
    async fn insert_product_batch(
        &self,
        products: &[ScoredProduct<'_>],
    ) -> Result<Vec<InsertedProduct>, DatabaseError>;

    /// Which of `barcodes` are already stored.
    async fn existing_barcodes(&self, barcodes: &[&str]) -> Result<HashSet<String>, DatabaseError>;

    /// Insert a lab result and its four contaminant rows as one unit.
    /// Returns the lab result id.
    async fn insert_lab_result(
        &self,
        product_id: &str,
        lab_result: &LabResult,
    ) -> Result<String, DatabaseError>;

    /// Delete every contaminant, lab result, and product.
    async fn reset_catalog(&self) -> Result<(), DatabaseError>;
}

impl CatalogStore for CradleDb {
    async fn insert_product_batch(
        &self,
        products: &[ScoredProduct<'_>],
    ) -> Result<Vec<InsertedProduct>, DatabaseError> {
        self.insert_products(products).await
    }

    async fn existing_barcodes(&self, barcodes: &[&str]) -> Result<HashSet<String>, DatabaseError> {
        self.find_existing_barcodes(barcodes).await
    }

    async fn insert_lab_result(
        &self,
        product_id: &str,
        lab_result: &LabResult,
    ) -> Result<String, DatabaseError> {
        self.create_lab_result(product_id, lab_result).await
    }

    async fn reset_catalog(&self) -> Result<(), DatabaseError> {
        self.delete_catalog().await
    }
}
