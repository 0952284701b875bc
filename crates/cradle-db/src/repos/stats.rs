use std::collections::BTreeMap;

use cradle_core::responses::CatalogStats;

use crate::CradleDb;
use crate::error::DatabaseError;
use crate::helpers::get_u32;
use crate::retry::with_retry;
use crate::schema::{CONTAMINANTS, LAB_RESULTS, PRODUCTS};

impl CradleDb {
    /// Aggregate counts over the persisted catalog.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any aggregate query fails.
    pub async fn catalog_stats(&self) -> Result<CatalogStats, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT COUNT(*), AVG(overall_score) FROM {PRODUCTS}"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let products = get_u32(&row, 0)?;
        let average_score = row.get::<Option<f64>>(1)?;

        let lab_results = self.count(&format!("SELECT COUNT(*) FROM {LAB_RESULTS}")).await?;
        let contaminants = self.count(&format!("SELECT COUNT(*) FROM {CONTAMINANTS}")).await?;
        let exceeding_measurements = self
            .count(&format!(
                "SELECT COUNT(*) FROM {CONTAMINANTS} WHERE exceeds_limit = 1"
            ))
            .await?;

        Ok(CatalogStats {
            products,
            lab_results,
            contaminants,
            exceeding_measurements,
            average_score,
            by_brand: self.counts_by("brand").await?,
            by_category: self.counts_by("category").await?,
        })
    }

    /// Delete the whole catalog in foreign-key order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails; the catalog is unchanged then.
    pub async fn delete_catalog(&self) -> Result<(), DatabaseError> {
        with_retry(&self.retry, "reset catalog", || async {
            let tx = self.conn.transaction().await?;
            tx.execute_batch(&format!(
                "DELETE FROM {CONTAMINANTS}; DELETE FROM {LAB_RESULTS}; DELETE FROM {PRODUCTS};"
            ))
            .await?;
            tx.commit().await?;
            Ok(())
        })
        .await?;
        tracing::info!("catalog cleared");
        Ok(())
    }

    async fn count(&self, sql: &str) -> Result<u32, DatabaseError> {
        let mut rows = self.conn.query(sql, ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_u32(&row, 0)
    }

    async fn counts_by(&self, column: &str) -> Result<BTreeMap<String, u32>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {column}, COUNT(*) FROM {PRODUCTS} GROUP BY {column}"),
                (),
            )
            .await?;
        let mut counts = BTreeMap::new();
        while let Some(row) = rows.next().await? {
            counts.insert(row.get::<String>(0)?, get_u32(&row, 1)?);
        }
        Ok(counts)
    }
}
