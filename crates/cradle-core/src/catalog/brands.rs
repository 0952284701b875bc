//! Brand tables: barcode prefixes, organic lines, and default seeding targets.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Prefix used for brands missing from [`BRAND_PREFIXES`].
pub const UNKNOWN_BRAND_PREFIX: &str = "000000";

/// Six-digit manufacturer prefix per brand.
pub const BRAND_PREFIXES: [(&str, &str); 11] = [
    ("Gerber", "015000"),
    ("Beech-Nut", "052200"),
    ("Earth's Best", "023923"),
    ("Happy Baby", "852697"),
    ("Plum Organics", "890180"),
    ("Sprout Organics", "850001"),
    ("Parent's Choice", "681131"),
    ("Up & Up", "492000"),
    ("Once Upon a Farm", "810607"),
    ("Little Spoon", "860002"),
    ("Serenity Kids", "860003"),
];

/// Brands whose entire line is certified organic.
pub const ORGANIC_BRANDS: [&str; 6] = [
    "Earth's Best",
    "Happy Baby",
    "Plum Organics",
    "Sprout Organics",
    "Once Upon a Farm",
    "Little Spoon",
];

/// Barcode prefix for `brand`, falling back to [`UNKNOWN_BRAND_PREFIX`].
#[must_use]
pub fn brand_prefix(brand: &str) -> &'static str {
    BRAND_PREFIXES
        .iter()
        .find(|(name, _)| *name == brand)
        .map_or(UNKNOWN_BRAND_PREFIX, |(_, prefix)| prefix)
}

#[must_use]
pub fn is_organic_brand(brand: &str) -> bool {
    ORGANIC_BRANDS.contains(&brand)
}

/// How many synthesized products to generate for one brand.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BrandTarget {
    pub brand: String,
    pub count: u32,
}

impl BrandTarget {
    #[must_use]
    pub fn new(brand: impl Into<String>, count: u32) -> Self {
        Self {
            brand: brand.into(),
            count,
        }
    }
}

/// Default brand distribution: 505 synthesized products, 525 with the reference table.
#[must_use]
pub fn default_brand_targets() -> Vec<BrandTarget> {
    [
        ("Gerber", 120),
        ("Beech-Nut", 70),
        ("Earth's Best", 70),
        ("Happy Baby", 60),
        ("Plum Organics", 50),
        ("Parent's Choice", 40),
        ("Sprout Organics", 35),
        ("Up & Up", 35),
        ("Once Upon a Farm", 25),
    ]
    .into_iter()
    .map(|(brand, count)| BrandTarget::new(brand, count))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_brand_prefix() {
        assert_eq!(brand_prefix("Gerber"), "015000");
        assert_eq!(brand_prefix("Up & Up"), "492000");
    }

    #[test]
    fn unknown_brand_falls_back_to_zero_prefix() {
        assert_eq!(brand_prefix("TestBrand"), "000000");
        assert_eq!(brand_prefix(""), UNKNOWN_BRAND_PREFIX);
    }

    #[test]
    fn prefixes_are_six_digits() {
        for (brand, prefix) in BRAND_PREFIXES {
            assert_eq!(prefix.len(), 6, "{brand}");
            assert!(prefix.chars().all(|c| c.is_ascii_digit()), "{brand}");
        }
    }

    #[test]
    fn default_targets_reach_five_hundred() {
        let total: u32 = default_brand_targets().iter().map(|t| t.count).sum();
        assert_eq!(total, 505);
    }
}
