//! Heavy-metal safety score.
//!
//! Each metal's concentration is expressed as a percentage of its fixed
//! limit, the percentages are combined with fixed weights into a composite,
//! and the composite is mapped onto `[0, 100]` piecewise:
//!
//! ```text
//! composite <  20   score = 90 + (20 - composite) / 2               (90, 100]
//! composite < 100   score = 90 - ((composite - 20) / 80) * 40       (50, 90]
//! otherwise         score = 50 - ((composite - 100) / 100) * 30     (-inf, 50]
//! ```
//!
//! The final score is clamped to `[0, 100]` and rounded to the nearest integer.
//! Both seams are continuous (90 at 20%, 50 at 100%).

use crate::entities::ContaminantLevels;
use crate::enums::Metal;
use crate::errors::CoreError;
use crate::responses::{MetalBreakdown, ScoreBreakdown};

/// Composite percent below which a product lands in the top band.
pub const LOW_COMPOSITE_BREAKPOINT: f64 = 20.0;

/// Composite percent at which combined limits are reached.
pub const LIMIT_COMPOSITE_BREAKPOINT: f64 = 100.0;

/// `measured` as a percentage of `metal`'s limit.
#[must_use]
pub fn percent_of_limit(metal: Metal, measured: f64) -> f64 {
    (measured / metal.safety_limit()) * 100.0
}

/// Weighted composite of the per-metal percentages.
///
/// # Errors
///
/// Returns `CoreError::InvalidMeasurement` for negative or non-finite input.
pub fn composite_percent(levels: &ContaminantLevels) -> Result<f64, CoreError> {
    levels.validate()?;
    Ok(weighted_composite(levels))
}

fn weighted_composite(levels: &ContaminantLevels) -> f64 {
    Metal::ALL
        .iter()
        .map(|&metal| metal.score_weight() * percent_of_limit(metal, levels.get(metal)))
        .sum()
}

/// Unclamped piecewise mapping. May be negative for very high composites.
pub(crate) fn raw_score(composite: f64) -> f64 {
    if composite < LOW_COMPOSITE_BREAKPOINT {
        90.0 + (LOW_COMPOSITE_BREAKPOINT - composite) / 2.0
    } else if composite < LIMIT_COMPOSITE_BREAKPOINT {
        90.0 - ((composite - LOW_COMPOSITE_BREAKPOINT) / 80.0) * 40.0
    } else {
        50.0 - ((composite - LIMIT_COMPOSITE_BREAKPOINT) / 100.0) * 30.0
    }
}

/// Map a composite percent to the final integer score.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn score_from_composite(composite: f64) -> u8 {
    raw_score(composite).clamp(0.0, 100.0).round() as u8
}

/// Safety score in `[0, 100]` for four measured concentrations (ppb).
///
/// Pure and deterministic.
///
/// # Errors
///
/// Returns `CoreError::InvalidMeasurement` for negative or non-finite input.
pub fn compute_safety_score(levels: &ContaminantLevels) -> Result<u8, CoreError> {
    Ok(score_from_composite(composite_percent(levels)?))
}

/// Full per-metal breakdown alongside the composite and score.
///
/// # Errors
///
/// Returns `CoreError::InvalidMeasurement` for negative or non-finite input.
pub fn score_breakdown(levels: &ContaminantLevels) -> Result<ScoreBreakdown, CoreError> {
    let composite = composite_percent(levels)?;
    let per_metal = levels.measurements().map(|m| MetalBreakdown {
        metal: m.metal,
        amount_detected: m.amount_detected,
        safety_limit: m.safety_limit(),
        percent_of_limit: percent_of_limit(m.metal, m.amount_detected),
        weight: m.metal.score_weight(),
        exceeds_limit: m.exceeds_limit(),
    });
    Ok(ScoreBreakdown {
        per_metal,
        composite_percent: composite,
        score: score_from_composite(composite),
    })
}
