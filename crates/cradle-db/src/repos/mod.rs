//! Repository methods, implemented as `impl CradleDb` blocks per table.

pub mod lab_result;
pub mod product;
pub mod stats;
