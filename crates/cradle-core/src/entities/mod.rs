//! Entity structs for Cradle domain objects.
//!
//! `Product`, `LabResult`, and the contaminant types are the in-memory model
//! produced by synthesis. The `*Record` structs mirror persisted rows.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod contaminant;
mod lab_result;
mod product;
mod records;

pub use contaminant::{ContaminantLevels, ContaminantMeasurement};
pub use lab_result::{LabResult, SYNTHESIZED_LAB_NAME};
pub use product::{CatalogEntry, Product, Provenance};
pub use records::{ContaminantRecord, LabResultRecord, ProductRecord};
