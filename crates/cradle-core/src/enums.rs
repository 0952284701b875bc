//! Heavy metals and product categories for Cradle.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! which is also the representation stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Metal
// ---------------------------------------------------------------------------

/// One of the four heavy metals measured in every lab result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Metal {
    Lead,
    Arsenic,
    Cadmium,
    Mercury,
}

impl Metal {
    /// Every metal, in measurement order.
    pub const ALL: [Self; 4] = [Self::Lead, Self::Arsenic, Self::Cadmium, Self::Mercury];

    /// Fixed reference limit in ppb.
    #[must_use]
    pub const fn safety_limit(self) -> f64 {
        match self {
            Self::Lead => 20.0,
            Self::Arsenic => 100.0,
            Self::Cadmium => 5.0,
            Self::Mercury => 1.0,
        }
    }

    /// Weight of this metal in the composite percent.
    ///
    /// Arsenic dominates because it is the binding constraint for rice-based products.
    #[must_use]
    pub const fn score_weight(self) -> f64 {
        match self {
            Self::Lead => 0.3,
            Self::Arsenic => 0.4,
            Self::Cadmium => 0.2,
            Self::Mercury => 0.1,
        }
    }

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Arsenic => "arsenic",
            Self::Cadmium => "cadmium",
            Self::Mercury => "mercury",
        }
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Retail category of a baby-food product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cereal,
    Puree,
    Snack,
    Juice,
    Meal,
}

impl Category {
    /// Every category, in the order used for weighted selection.
    pub const ALL: [Self; 5] = [
        Self::Puree,
        Self::Snack,
        Self::Cereal,
        Self::Juice,
        Self::Meal,
    ];

    /// Share (in percent) of synthesized products drawn from this category.
    ///
    /// The weights over [`Category::ALL`] sum to 100.
    #[must_use]
    pub const fn selection_weight(self) -> u32 {
        match self {
            Self::Puree => 45,
            Self::Snack => 20,
            Self::Cereal => 15,
            Self::Juice | Self::Meal => 10,
        }
    }

    /// Whether product names in this category carry a "Stage N" label.
    #[must_use]
    pub const fn uses_stage_labels(self) -> bool {
        matches!(self, Self::Puree | Self::Meal)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cereal => "cereal",
            Self::Puree => "puree",
            Self::Snack => "snack",
            Self::Juice => "juice",
            Self::Meal => "meal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(metal_lead, Metal, Metal::Lead, "lead");
    test_serde_roundtrip!(metal_mercury, Metal, Metal::Mercury, "mercury");
    test_serde_roundtrip!(category_puree, Category, Category::Puree, "puree");
    test_serde_roundtrip!(category_juice, Category, Category::Juice, "juice");

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = Metal::ALL.iter().map(|m| m.score_weight()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn limits_match_reference_values() {
        assert_eq!(Metal::Lead.safety_limit(), 20.0);
        assert_eq!(Metal::Arsenic.safety_limit(), 100.0);
        assert_eq!(Metal::Cadmium.safety_limit(), 5.0);
        assert_eq!(Metal::Mercury.safety_limit(), 1.0);
    }

    #[test]
    fn category_selection_weights_sum_to_100() {
        let total: u32 = Category::ALL.iter().map(|c| c.selection_weight()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn only_puree_and_meal_use_stage_labels() {
        let staged: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.uses_stage_labels())
            .collect();
        assert_eq!(staged, vec![Category::Puree, Category::Meal]);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", Metal::Arsenic), "arsenic");
        assert_eq!(format!("{}", Metal::Cadmium), "cadmium");
        assert_eq!(format!("{}", Category::Cereal), "cereal");
        assert_eq!(format!("{}", Category::Meal), "meal");
    }
}
