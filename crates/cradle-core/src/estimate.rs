//! Ingredient-aware contaminant estimation for synthesized products.
//!
//! Lead, arsenic, and cadmium start from the category baseline, are scaled by
//! an ingredient risk modifier (reduced again for organic products), and get
//! an independent uniform jitter in `[0.7, 1.3]` each. Mercury is driven by
//! other factors, so it only gets its own jitter around the baseline.
//! Every value is rounded to two decimals.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::entities::ContaminantLevels;
use crate::enums::Category;

/// Multiplicative jitter applied to every estimated concentration.
pub const JITTER_RANGE: RangeInclusive<f64> = 0.7..=1.3;

/// Ingredients known to accumulate heavy metals from soil or water.
pub const HIGH_RISK_INGREDIENTS: [&str; 3] = ["Rice", "Sweet Potato", "Carrot"];

/// Ingredients that reliably test low.
pub const LOW_RISK_INGREDIENTS: [&str; 4] = ["Banana", "Apple", "Pear", "Blueberry"];

pub const HIGH_RISK_MODIFIER: f64 = 1.5;
pub const LOW_RISK_MODIFIER: f64 = 0.6;

/// Organic certification lowers, but does not eliminate, heavy-metal uptake.
pub const ORGANIC_MODIFIER: f64 = 0.85;

/// Fixed starting levels (ppb) for a category before any modifier.
#[must_use]
pub const fn category_baseline(category: Category) -> ContaminantLevels {
    match category {
        Category::Cereal => ContaminantLevels::new(4.0, 85.0, 2.5, 0.3),
        Category::Puree => ContaminantLevels::new(2.5, 8.0, 2.0, 0.2),
        Category::Snack => ContaminantLevels::new(4.5, 45.0, 3.5, 0.3),
        Category::Juice => ContaminantLevels::new(6.5, 10.0, 0.8, 0.1),
        Category::Meal => ContaminantLevels::new(3.0, 20.0, 2.8, 0.4),
    }
}

/// Risk multiplier for an ingredient label.
///
/// High-risk matches take precedence over low-risk ones (`"Apple & Carrot"`
/// is high risk). Matching is case-insensitive.
#[must_use]
pub fn ingredient_modifier(ingredient: &str, is_organic: bool) -> f64 {
    let lower = ingredient.to_lowercase();

    let base = if contains_any(&lower, &HIGH_RISK_INGREDIENTS) {
        HIGH_RISK_MODIFIER
    } else if contains_any(&lower, &LOW_RISK_INGREDIENTS) {
        LOW_RISK_MODIFIER
    } else {
        1.0
    };

    if is_organic {
        base * ORGANIC_MODIFIER
    } else {
        base
    }
}

fn contains_any(lowercased: &str, set: &[&str]) -> bool {
    set.iter()
        .any(|item| lowercased.contains(item.to_lowercase().as_str()))
}

/// Estimate all four concentrations for a synthesized product.
///
/// Draws exactly four jitter values from `rng`, in lead, arsenic, cadmium,
/// mercury order, so a seeded generator reproduces the estimate exactly.
pub fn estimate_contaminants<R: Rng + ?Sized>(
    category: Category,
    ingredient: &str,
    is_organic: bool,
    rng: &mut R,
) -> ContaminantLevels {
    let baseline = category_baseline(category);
    let modifier = ingredient_modifier(ingredient, is_organic);

    let lead = baseline.lead * modifier * rng.random_range(JITTER_RANGE);
    let arsenic = baseline.arsenic * modifier * rng.random_range(JITTER_RANGE);
    let cadmium = baseline.cadmium * modifier * rng.random_range(JITTER_RANGE);
    let mercury = baseline.mercury * rng.random_range(JITTER_RANGE);

    ContaminantLevels::new(
        round_ppb(lead),
        round_ppb(arsenic),
        round_ppb(cadmium),
        round_ppb(mercury),
    )
}

/// Round to two decimal places.
#[must_use]
pub fn round_ppb(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::enums::Metal;

    fn within(value: f64, low: f64, high: f64) -> bool {
        // Rounding to 2dp can move a value by at most 0.005.
        value >= round_ppb(low) - 0.005 && value <= round_ppb(high) + 0.005
    }

    #[test]
    fn modifiers_follow_ingredient_sets() {
        assert_eq!(ingredient_modifier("Brown Rice", false), 1.5);
        assert_eq!(ingredient_modifier("Sweet Potato", false), 1.5);
        assert_eq!(ingredient_modifier("Banana", false), 0.6);
        assert_eq!(ingredient_modifier("Peas", false), 1.0);
        assert!((ingredient_modifier("Carrot", true) - 1.275).abs() < 1e-12);
        assert!((ingredient_modifier("Pear", true) - 0.51).abs() < 1e-12);
        assert!((ingredient_modifier("Mango", true) - 0.85).abs() < 1e-12);
    }

    #[test]
    fn high_risk_wins_over_low_risk() {
        assert_eq!(ingredient_modifier("Apple & Carrot", false), 1.5);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(ingredient_modifier("RICE PUFFS", false), 1.5);
        assert_eq!(ingredient_modifier("blueberry", false), 0.6);
    }

    #[test]
    fn baselines_rank_as_documented() {
        let arsenic_max = Category::ALL
            .into_iter()
            .max_by(|a, b| {
                category_baseline(*a)
                    .arsenic
                    .total_cmp(&category_baseline(*b).arsenic)
            })
            .unwrap();
        let lead_max = Category::ALL
            .into_iter()
            .max_by(|a, b| {
                category_baseline(*a)
                    .lead
                    .total_cmp(&category_baseline(*b).lead)
            })
            .unwrap();
        assert_eq!(arsenic_max, Category::Cereal);
        assert_eq!(lead_max, Category::Juice);
    }

    #[test]
    fn estimates_stay_within_jittered_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for category in Category::ALL {
            let baseline = category_baseline(category);
            for (ingredient, organic) in [("Rice", false), ("Banana", true), ("Peas", false)] {
                let modifier = ingredient_modifier(ingredient, organic);
                for _ in 0..200 {
                    let est = estimate_contaminants(category, ingredient, organic, &mut rng);
                    for metal in [Metal::Lead, Metal::Arsenic, Metal::Cadmium] {
                        let center = baseline.get(metal) * modifier;
                        assert!(
                            within(est.get(metal), center * 0.7, center * 1.3),
                            "{category} {ingredient} {metal} = {}",
                            est.get(metal)
                        );
                    }
                    assert!(within(
                        est.mercury,
                        baseline.mercury * 0.7,
                        baseline.mercury * 1.3
                    ));
                    assert!(est.validate().is_ok());
                }
            }
        }
    }

    #[test]
    fn mercury_ignores_ingredient_and_organic_modifiers() {
        let baseline = category_baseline(Category::Cereal).mercury;
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let est = estimate_contaminants(Category::Cereal, "Rice", false, &mut rng);
            assert!(within(est.mercury, baseline * 0.7, baseline * 1.3));
        }
    }

    #[test]
    fn values_are_rounded_to_two_decimals() {
        let mut rng = StdRng::seed_from_u64(3);
        let est = estimate_contaminants(Category::Snack, "Puffs", false, &mut rng);
        for metal in Metal::ALL {
            let value = est.get(metal);
            assert!(((value * 100.0).round() - value * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn seeded_generator_reproduces_estimate() {
        let a = estimate_contaminants(
            Category::Juice,
            "Apple Juice",
            true,
            &mut StdRng::seed_from_u64(42),
        );
        let b = estimate_contaminants(
            Category::Juice,
            "Apple Juice",
            true,
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(a, b);
    }
}
