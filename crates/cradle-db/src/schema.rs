//! Mapping between the in-memory catalog model and table columns.
//!
//! Repos and the seeder never spell column names themselves; they go through
//! the column lists and row converters here.

use cradle_core::entities::{
    ContaminantMeasurement, ContaminantRecord, LabResult, LabResultRecord, Product, ProductRecord,
};
use libsql::Value;

use crate::error::DatabaseError;
use crate::helpers::{
    get_bool, get_opt_string, parse_date, parse_datetime, parse_enum, parse_optional_u64,
};

pub const PRODUCTS: &str = "products";
pub const LAB_RESULTS: &str = "lab_results";
pub const CONTAMINANTS: &str = "contaminants";

/// Columns written for a new product; `id` and `created_at` come from defaults.
pub const PRODUCT_INSERT_COLUMNS: [&str; 10] = [
    "name",
    "brand",
    "category",
    "barcode",
    "description",
    "overall_score",
    "is_organic",
    "hbbf_tested",
    "test_year",
    "rng_seed",
];

/// Column order expected by [`row_to_product`].
pub const PRODUCT_SELECT_COLUMNS: &str = "id, name, brand, category, barcode, description, \
     overall_score, is_organic, hbbf_tested, test_year, rng_seed, created_at";

pub const LAB_RESULT_INSERT_COLUMNS: [&str; 5] =
    ["id", "product_id", "lab_name", "test_date", "report_url"];

/// Column order expected by [`row_to_lab_result`].
pub const LAB_RESULT_SELECT_COLUMNS: &str =
    "id, product_id, lab_name, test_date, report_url, created_at";

/// `exceeds_limit` is generated by the database and never written.
pub const CONTAMINANT_INSERT_COLUMNS: [&str; 4] =
    ["lab_result_id", "metal", "amount_detected", "safety_limit"];

/// Column order expected by [`row_to_contaminant`].
pub const CONTAMINANT_SELECT_COLUMNS: &str =
    "id, lab_result_id, metal, amount_detected, safety_limit, exceeds_limit";

/// `INSERT INTO {table} (cols) VALUES (?1, ..), (..) [RETURNING ..]` for `rows` rows.
#[must_use]
pub fn multi_row_insert_sql(
    table: &str,
    columns: &[&str],
    rows: usize,
    returning: Option<&str>,
) -> String {
    let width = columns.len();
    let tuples: Vec<String> = (0..rows)
        .map(|row| {
            let placeholders: Vec<String> = (1..=width)
                .map(|col| format!("?{}", row * width + col))
                .collect();
            format!("({})", placeholders.join(", "))
        })
        .collect();

    let mut sql = format!(
        "INSERT INTO {table} ({}) VALUES {}",
        columns.join(", "),
        tuples.join(", ")
    );
    if let Some(returning) = returning {
        sql.push_str(" RETURNING ");
        sql.push_str(returning);
    }
    sql
}

fn bool_value(flag: bool) -> Value {
    Value::Integer(i64::from(flag))
}

/// Values for [`PRODUCT_INSERT_COLUMNS`], in order.
#[must_use]
pub fn product_values(product: &Product, overall_score: u8) -> [Value; 10] {
    let provenance = product.provenance;
    [
        Value::Text(product.name.clone()),
        Value::Text(product.brand.clone()),
        Value::Text(product.category.as_str().to_string()),
        Value::Text(product.barcode.clone()),
        Value::Text(product.description.clone()),
        Value::Integer(i64::from(overall_score)),
        bool_value(product.is_organic),
        bool_value(provenance.hbbf_tested()),
        provenance
            .test_year()
            .map_or(Value::Null, |year| Value::Integer(i64::from(year))),
        // u64 seeds do not fit SQLite's signed integers.
        provenance
            .rng_seed()
            .map_or(Value::Null, |seed| Value::Text(seed.to_string())),
    ]
}

/// Values for [`LAB_RESULT_INSERT_COLUMNS`], in order.
#[must_use]
pub fn lab_result_values(id: &str, product_id: &str, lab_result: &LabResult) -> [Value; 5] {
    [
        Value::Text(id.to_string()),
        Value::Text(product_id.to_string()),
        Value::Text(lab_result.lab_name.clone()),
        Value::Text(lab_result.test_date.format("%Y-%m-%d").to_string()),
        lab_result
            .report_url
            .clone()
            .map_or(Value::Null, Value::Text),
    ]
}

/// Values for [`CONTAMINANT_INSERT_COLUMNS`], in order.
#[must_use]
pub fn contaminant_values(lab_result_id: &str, measurement: &ContaminantMeasurement) -> [Value; 4] {
    [
        Value::Text(lab_result_id.to_string()),
        Value::Text(measurement.metal.as_str().to_string()),
        Value::Real(measurement.amount_detected),
        Value::Real(measurement.safety_limit()),
    ]
}

/// Parse a row selected with [`PRODUCT_SELECT_COLUMNS`].
///
/// # Errors
///
/// Returns `DatabaseError` if a column is missing or malformed.
pub fn row_to_product(row: &libsql::Row) -> Result<ProductRecord, DatabaseError> {
    let score = row.get::<i64>(6)?;
    let test_year = row
        .get::<Option<i64>>(9)?
        .map(i32::try_from)
        .transpose()
        .map_err(|e| DatabaseError::InvalidState(format!("test_year out of range: {e}")))?;

    Ok(ProductRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        brand: row.get(2)?,
        category: parse_enum(&row.get::<String>(3)?)?,
        barcode: row.get(4)?,
        description: row.get(5)?,
        overall_score: u8::try_from(score)
            .map_err(|_| DatabaseError::InvalidState(format!("overall_score {score} out of range")))?,
        is_organic: get_bool(row, 7)?,
        hbbf_tested: get_bool(row, 8)?,
        test_year,
        rng_seed: parse_optional_u64(get_opt_string(row, 10)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

/// Parse a row selected with [`LAB_RESULT_SELECT_COLUMNS`].
///
/// # Errors
///
/// Returns `DatabaseError` if a column is missing or malformed.
pub fn row_to_lab_result(row: &libsql::Row) -> Result<LabResultRecord, DatabaseError> {
    Ok(LabResultRecord {
        id: row.get(0)?,
        product_id: row.get(1)?,
        lab_name: row.get(2)?,
        test_date: parse_date(&row.get::<String>(3)?)?,
        report_url: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

/// Parse a row selected with [`CONTAMINANT_SELECT_COLUMNS`].
///
/// # Errors
///
/// Returns `DatabaseError` if a column is missing or malformed.
pub fn row_to_contaminant(row: &libsql::Row) -> Result<ContaminantRecord, DatabaseError> {
    Ok(ContaminantRecord {
        id: row.get(0)?,
        lab_result_id: row.get(1)?,
        metal: parse_enum(&row.get::<String>(2)?)?,
        amount_detected: row.get(3)?,
        safety_limit: row.get(4)?,
        exceeds_limit: get_bool(row, 5)?,
    })
}
