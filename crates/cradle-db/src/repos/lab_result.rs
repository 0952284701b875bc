use cradle_core::entities::{ContaminantRecord, LabResult, LabResultRecord};

use crate::CradleDb;
use crate::error::DatabaseError;
use crate::retry::with_retry;
use crate::schema::{
    CONTAMINANT_INSERT_COLUMNS, CONTAMINANT_SELECT_COLUMNS, CONTAMINANTS,
    LAB_RESULT_INSERT_COLUMNS, LAB_RESULT_SELECT_COLUMNS, LAB_RESULTS, contaminant_values,
    lab_result_values, multi_row_insert_sql, row_to_contaminant, row_to_lab_result,
};

impl CradleDb {
    /// Insert a lab result and one contaminant row per metal in a single
    /// transaction. Returns the new lab result id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any write fails; nothing is kept in that case.
    pub async fn create_lab_result(
        &self,
        product_id: &str,
        lab_result: &LabResult,
    ) -> Result<String, DatabaseError> {
        let id = self.generate_id("lab").await?;
        with_retry(&self.retry, "insert lab result", || {
            self.write_lab_result(&id, product_id, lab_result)
        })
        .await?;
        Ok(id)
    }

    async fn write_lab_result(
        &self,
        id: &str,
        product_id: &str,
        lab_result: &LabResult,
    ) -> Result<(), DatabaseError> {
        let lab_sql = multi_row_insert_sql(LAB_RESULTS, &LAB_RESULT_INSERT_COLUMNS, 1, None);
        let contaminant_sql =
            multi_row_insert_sql(CONTAMINANTS, &CONTAMINANT_INSERT_COLUMNS, 1, None);

        let tx = self.conn.transaction().await?;
        let written: Result<(), DatabaseError> = async {
            tx.execute(&lab_sql, lab_result_values(id, product_id, lab_result).to_vec())
                .await?;
            for measurement in lab_result.measurements() {
                tx.execute(
                    &contaminant_sql,
                    contaminant_values(id, &measurement).to_vec(),
                )
                .await?;
            }
            Ok(())
        }
        .await;

        match written {
            Ok(()) => {
                tx.commit().await?;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(lab_result_id = id, error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row parsing fails.
    pub async fn lab_results_for_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<LabResultRecord>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {LAB_RESULT_SELECT_COLUMNS} FROM {LAB_RESULTS} \
                     WHERE product_id = ?1 ORDER BY test_date DESC"
                ),
                [product_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_lab_result(&row)?);
        }
        Ok(results)
    }

    /// Contaminant rows for one lab result, ordered lead, arsenic, cadmium, mercury.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row parsing fails.
    pub async fn contaminants_for_lab_result(
        &self,
        lab_result_id: &str,
    ) -> Result<Vec<ContaminantRecord>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {CONTAMINANT_SELECT_COLUMNS} FROM {CONTAMINANTS} \
                     WHERE lab_result_id = ?1 \
                     ORDER BY CASE metal WHEN 'lead' THEN 0 WHEN 'arsenic' THEN 1 \
                     WHEN 'cadmium' THEN 2 ELSE 3 END"
                ),
                [lab_result_id],
            )
            .await?;
        let mut contaminants = Vec::new();
        while let Some(row) = rows.next().await? {
            contaminants.push(row_to_contaminant(&row)?);
        }
        Ok(contaminants)
    }
}
