use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::contaminant::{ContaminantLevels, ContaminantMeasurement};
use crate::errors::CoreError;

/// Lab name recorded for synthesized (estimated) entries.
pub const SYNTHESIZED_LAB_NAME: &str = "Cradle Estimate (not lab tested)";

/// One laboratory test event for one product.
///
/// Holds exactly one concentration per metal; [`LabResult::measurements`]
/// expands them into the four per-metal rows that get persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LabResult {
    pub lab_name: String,
    pub test_date: NaiveDate,
    pub report_url: Option<String>,
    pub levels: ContaminantLevels,
}

impl LabResult {
    /// Build a lab result, rejecting invalid concentrations.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidMeasurement` if any level is negative or non-finite.
    pub fn new(
        lab_name: impl Into<String>,
        test_date: NaiveDate,
        report_url: Option<String>,
        levels: ContaminantLevels,
    ) -> Result<Self, CoreError> {
        levels.validate()?;
        Ok(Self {
            lab_name: lab_name.into(),
            test_date,
            report_url,
            levels,
        })
    }

    #[must_use]
    pub const fn measurements(&self) -> [ContaminantMeasurement; 4] {
        self.levels.measurements()
    }
}
