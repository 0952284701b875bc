use std::collections::HashSet;

use libsql::Value;

use crate::CradleDb;
use crate::error::DatabaseError;
use crate::retry::with_retry;
use crate::schema::{
    PRODUCT_INSERT_COLUMNS, PRODUCT_SELECT_COLUMNS, PRODUCTS, multi_row_insert_sql, product_values,
    row_to_product,
};
use crate::store::{InsertedProduct, ScoredProduct};
use cradle_core::entities::ProductRecord;

impl CradleDb {
    /// Insert `products` with one multi-row statement and return the generated ids.
    ///
    /// The statement is atomic: on error no product of the batch is stored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails (including UNIQUE barcode
    /// violations) or the store returns fewer rows than were inserted.
    pub async fn insert_products(
        &self,
        products: &[ScoredProduct<'_>],
    ) -> Result<Vec<InsertedProduct>, DatabaseError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let sql = multi_row_insert_sql(
            PRODUCTS,
            &PRODUCT_INSERT_COLUMNS,
            products.len(),
            Some("id, barcode"),
        );
        let params: Vec<Value> = products
            .iter()
            .flat_map(|p| product_values(p.product, p.overall_score))
            .collect();

        let inserted = with_retry(&self.retry, "insert products", || async {
            let mut rows = self.conn.query(&sql, params.clone()).await?;
            let mut inserted = Vec::with_capacity(products.len());
            while let Some(row) = rows.next().await? {
                inserted.push(InsertedProduct {
                    id: row.get(0)?,
                    barcode: row.get(1)?,
                });
            }
            Ok(inserted)
        })
        .await?;

        if inserted.len() != products.len() {
            return Err(DatabaseError::InvalidState(format!(
                "inserted {} products but {} rows were returned",
                products.len(),
                inserted.len()
            )));
        }
        Ok(inserted)
    }

    /// Return the subset of `barcodes` already present in `products`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the lookup fails.
    pub async fn find_existing_barcodes(
        &self,
        barcodes: &[&str],
    ) -> Result<HashSet<String>, DatabaseError> {
        let mut existing = HashSet::new();
        if barcodes.is_empty() {
            return Ok(existing);
        }

        let placeholders: Vec<String> = (1..=barcodes.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "SELECT barcode FROM {PRODUCTS} WHERE barcode IN ({})",
            placeholders.join(", ")
        );
        let params: Vec<Value> = barcodes
            .iter()
            .map(|b| Value::Text((*b).to_string()))
            .collect();

        let mut rows = self.conn.query(&sql, params).await?;
        while let Some(row) = rows.next().await? {
            existing.insert(row.get::<String>(0)?);
        }
        Ok(existing)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row parsing fails.
    pub async fn get_product_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Option<ProductRecord>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {PRODUCT_SELECT_COLUMNS} FROM {PRODUCTS} WHERE barcode = ?1"),
                [barcode],
            )
            .await?;
        rows.next()
            .await?
            .map(|row| row_to_product(&row))
            .transpose()
    }

    /// Products in insertion order, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row parsing fails.
    pub async fn list_products(&self, limit: u32) -> Result<Vec<ProductRecord>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {PRODUCT_SELECT_COLUMNS} FROM {PRODUCTS} ORDER BY rowid LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut products = Vec::new();
        while let Some(row) = rows.next().await? {
            products.push(row_to_product(&row)?);
        }
        Ok(products)
    }
}
