use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Category, Metal};

/// A product row as persisted, including its generated id and stored score.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: Category,
    pub barcode: String,
    pub description: String,
    pub overall_score: u8,
    pub is_organic: bool,
    pub hbbf_tested: bool,
    pub test_year: Option<i32>,
    pub rng_seed: Option<u64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LabResultRecord {
    pub id: String,
    pub product_id: String,
    pub lab_name: String,
    pub test_date: NaiveDate,
    pub report_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A persisted per-metal measurement. `exceeds_limit` is computed by the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ContaminantRecord {
    pub id: String,
    pub lab_result_id: String,
    pub metal: Metal,
    pub amount_detected: f64,
    pub safety_limit: f64,
    pub exceeds_limit: bool,
}
