//! # cradle-db
//!
//! libSQL persistence for the Cradle catalog and the batch seeder that fills it.
//!
//! Products, lab results, and per-metal contaminant rows live in three tables
//! linked by foreign keys. The `contaminants.exceeds_limit` column is generated
//! by the database from `amount_detected > safety_limit`, so it can never
//! disagree with the values it is derived from.
//!
//! Uses the `libsql` crate (C `SQLite` fork) for both local files and remote
//! Turso databases.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod schema;
pub mod seed;
pub mod store;

use std::path::Path;

use cradle_config::DatabaseConfig;
use error::DatabaseError;
use libsql::Builder;
use retry::RetryConfig;

pub use store::{CatalogStore, InsertedProduct, ScoredProduct};

/// Central database handle for the catalog.
pub struct CradleDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    retry: RetryConfig,
    remote: bool,
}

impl CradleDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::connect(db, RetryConfig::default(), false).await
    }

    /// Open a remote libSQL database (e.g., Turso).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or migrations fail.
    pub async fn open_remote(
        url: &str,
        auth_token: &str,
        retry: RetryConfig,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::connect(db, retry, true).await
    }

    /// Open whichever database `config` describes, creating the parent
    /// directory of a local file if needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory, connection, or migrations fail.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let retry = RetryConfig::from(config);
        if config.is_remote() {
            return Self::open_remote(&config.url, &config.auth_token, retry).await;
        }

        if config.path != ":memory:" {
            if let Some(parent) = Path::new(&config.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
                }
            }
        }
        let db = Builder::new_local(&config.path).build().await?;
        Self::connect(db, retry, false).await
    }

    async fn connect(
        db: libsql::Database,
        retry: RetryConfig,
        remote: bool,
    ) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let cradle_db = Self {
            db,
            conn,
            retry,
            remote,
        };
        cradle_db.run_migrations().await?;
        Ok(cradle_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Whether this handle talks to a remote database.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"lab-a3f8b2c10e4d5f67"` (64 random bits).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(8)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    async fn test_db() -> CradleDb {
        CradleDb::open_local(":memory:").await.unwrap()
    }

    async fn table_exists(db: &CradleDb, table: &str) -> bool {
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
            )
            .await
            .unwrap();
        rows.next().await.unwrap().is_some()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        for table in ["products", "lab_results", "contaminants"] {
            assert!(table_exists(&db, table).await, "table '{table}' should exist");
        }
        assert!(!db.is_remote());
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("lab").await.unwrap();
        assert!(id.starts_with("lab-"), "ID should start with 'lab-': {id}");
        assert_eq!(id.len(), 4 + 16);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn product_defaults_fill_id_and_timestamp() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO products (name, brand, category, barcode, overall_score) \
                 VALUES ('Test Pear', 'TestBrand', 'puree', '000000000001', 90)",
                (),
            )
            .await
            .unwrap();
        let mut rows = db
            .conn()
            .query("SELECT id, created_at FROM products", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        let id = row.get::<String>(0).unwrap();
        assert!(id.starts_with("prd-"));
        assert_eq!(id.len(), 4 + 16, "column default carries 64 random bits: {id}");
        assert!(helpers::parse_datetime(&row.get::<String>(1).unwrap()).is_ok());
    }

    #[tokio::test]
    async fn score_outside_range_is_rejected() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO products (name, brand, category, barcode, overall_score) \
                 VALUES ('Bad', 'TestBrand', 'puree', '000000000002', 101)",
                (),
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn contaminant_requires_existing_lab_result() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO contaminants (lab_result_id, metal, amount_detected, safety_limit) \
                 VALUES ('lab-missing', 'lead', 1.0, 20.0)",
                (),
            )
            .await;
        assert!(result.is_err(), "foreign key should be enforced");
    }

    #[tokio::test]
    async fn open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cradle.db");
        let config = DatabaseConfig {
            path: path.to_string_lossy().into_owned(),
            ..Default::default()
        };
        let db = CradleDb::open(&config).await.unwrap();
        assert!(table_exists(&db, "products").await);
        assert!(path.exists());
    }
}
