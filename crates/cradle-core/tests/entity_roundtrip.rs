//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use cradle_core::entities::*;
use cradle_core::enums::*;
use cradle_core::responses::*;
use cradle_core::scoring::score_breakdown;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
}

roundtrip_and_validate!(
    reference_product_roundtrip,
    CatalogEntry,
    CatalogEntry {
        product: Product {
            name: "Gerber 1st Foods Apple".into(),
            brand: "Gerber".into(),
            category: Category::Puree,
            barcode: "015000071240".into(),
            description: "Stage 1 apple puree.".into(),
            is_organic: false,
            provenance: Provenance::Reference { test_year: 2019 },
        },
        lab_result: LabResult::new(
            "Brooks Applied Labs",
            test_date(),
            Some("https://www.healthybabyfood.org".into()),
            ContaminantLevels::new(1.2, 8.5, 1.1, 0.1),
        )
        .unwrap(),
    }
);

roundtrip_and_validate!(
    synthesized_product_roundtrip,
    Product,
    Product {
        name: "Happy Baby Stage 2 Organic Pear".into(),
        brand: "Happy Baby".into(),
        category: Category::Puree,
        barcode: "852697123456".into(),
        description: "Estimated.".into(),
        is_organic: true,
        provenance: Provenance::Synthesized {
            rng_seed: 0xDEAD_BEEF,
        },
    }
);

roundtrip_and_validate!(
    product_record_roundtrip,
    ProductRecord,
    ProductRecord {
        id: "prd-a3f8b2c1".into(),
        name: "Beech-Nut Rice Cereal".into(),
        brand: "Beech-Nut".into(),
        category: Category::Cereal,
        barcode: "052200034225".into(),
        description: "Stage 1 rice cereal.".into(),
        overall_score: 67,
        is_organic: false,
        hbbf_tested: true,
        test_year: Some(2019),
        rng_seed: None,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    lab_result_record_roundtrip,
    LabResultRecord,
    LabResultRecord {
        id: "lab-11aa22bb".into(),
        product_id: "prd-a3f8b2c1".into(),
        lab_name: SYNTHESIZED_LAB_NAME.into(),
        test_date: test_date(),
        report_url: None,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    contaminant_record_roundtrip,
    ContaminantRecord,
    ContaminantRecord {
        id: "ctm-0f0f0f0f".into(),
        lab_result_id: "lab-11aa22bb".into(),
        metal: Metal::Arsenic,
        amount_detected: 119.0,
        safety_limit: 100.0,
        exceeds_limit: true,
    }
);

roundtrip_and_validate!(
    score_breakdown_roundtrip,
    ScoreBreakdown,
    score_breakdown(&ContaminantLevels::new(3.9, 119.0, 2.7, 0.8)).unwrap()
);

roundtrip_and_validate!(
    seed_summary_roundtrip,
    SeedSummary,
    SeedSummary {
        master_seed: 42,
        products: 25,
        reference_products: 20,
        synthesized_products: 5,
        lab_results: 24,
        contaminants: 96,
        batches: 1,
        skipped_lab_results: vec!["TestBrand Rice".into()],
        barcodes_regenerated: 0,
        by_brand: BTreeMap::from([("TestBrand".into(), 5)]),
        by_category: BTreeMap::from([("puree".into(), 3), ("cereal".into(), 2)]),
        duration_ms: 120,
    }
);

roundtrip_and_validate!(
    catalog_stats_roundtrip,
    CatalogStats,
    CatalogStats {
        products: 2,
        lab_results: 2,
        contaminants: 8,
        exceeding_measurements: 1,
        average_score: Some(80.5),
        by_brand: BTreeMap::from([("Gerber".into(), 2)]),
        by_category: BTreeMap::from([("juice".into(), 2)]),
    }
);

#[test]
fn provenance_serializes_with_kind_tag() {
    let json = serde_json::to_value(Provenance::Synthesized { rng_seed: 7 }).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "synthesized", "rng_seed": 7 }));
}

#[test]
fn enums_serialize_snake_case() {
    assert_eq!(serde_json::to_value(Metal::Mercury).unwrap(), "mercury");
    assert_eq!(serde_json::to_value(Category::Cereal).unwrap(), "cereal");
}
