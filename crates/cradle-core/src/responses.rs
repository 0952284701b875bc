//! Response types returned by `cradle` commands.
//!
//! These structs define the shape of JSON output for `cradle score`,
//! `cradle seed`, and `cradle stats`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Metal;

/// One metal's contribution to a score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MetalBreakdown {
    pub metal: Metal,
    pub amount_detected: f64,
    pub safety_limit: f64,
    pub percent_of_limit: f64,
    pub weight: f64,
    pub exceeds_limit: bool,
}

/// Response from `cradle score`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScoreBreakdown {
    pub per_metal: [MetalBreakdown; 4],
    pub composite_percent: f64,
    pub score: u8,
}

/// Response from `cradle seed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SeedSummary {
    /// Master seed every synthesized product's seed was drawn from.
    pub master_seed: u64,
    pub products: u32,
    pub reference_products: u32,
    pub synthesized_products: u32,
    pub lab_results: u32,
    pub contaminants: u32,
    pub batches: u32,
    /// Names of products whose lab result could not be written.
    pub skipped_lab_results: Vec<String>,
    pub barcodes_regenerated: u32,
    pub by_brand: BTreeMap<String, u32>,
    pub by_category: BTreeMap<String, u32>,
    pub duration_ms: u64,
}

/// Response from `cradle stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CatalogStats {
    pub products: u32,
    pub lab_results: u32,
    pub contaminants: u32,
    pub exceeding_measurements: u32,
    pub average_score: Option<f64>,
    pub by_brand: BTreeMap<String, u32>,
    pub by_category: BTreeMap<String, u32>,
}
