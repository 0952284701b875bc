use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Metal;
use crate::errors::CoreError;

/// Concentrations of all four metals for one test, in ppb.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ContaminantLevels {
    pub lead: f64,
    pub arsenic: f64,
    pub cadmium: f64,
    pub mercury: f64,
}

impl ContaminantLevels {
    #[must_use]
    pub const fn new(lead: f64, arsenic: f64, cadmium: f64, mercury: f64) -> Self {
        Self {
            lead,
            arsenic,
            cadmium,
            mercury,
        }
    }

    /// Concentration recorded for `metal`.
    #[must_use]
    pub const fn get(&self, metal: Metal) -> f64 {
        match metal {
            Metal::Lead => self.lead,
            Metal::Arsenic => self.arsenic,
            Metal::Cadmium => self.cadmium,
            Metal::Mercury => self.mercury,
        }
    }

    /// Reject negative, NaN, or infinite concentrations.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidMeasurement` naming the first offending metal.
    pub fn validate(&self) -> Result<(), CoreError> {
        for metal in Metal::ALL {
            let value = self.get(metal);
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidMeasurement { metal, value });
            }
        }
        Ok(())
    }

    /// One measurement per metal, in [`Metal::ALL`] order.
    #[must_use]
    pub const fn measurements(&self) -> [ContaminantMeasurement; 4] {
        [
            ContaminantMeasurement::new(Metal::Lead, self.lead),
            ContaminantMeasurement::new(Metal::Arsenic, self.arsenic),
            ContaminantMeasurement::new(Metal::Cadmium, self.cadmium),
            ContaminantMeasurement::new(Metal::Mercury, self.mercury),
        ]
    }
}

/// A single metal's detected concentration.
///
/// `safety_limit` and `exceeds_limit` are always derived from the metal and
/// the detected amount, never stored alongside them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ContaminantMeasurement {
    pub metal: Metal,
    pub amount_detected: f64,
}

impl ContaminantMeasurement {
    #[must_use]
    pub const fn new(metal: Metal, amount_detected: f64) -> Self {
        Self {
            metal,
            amount_detected,
        }
    }

    #[must_use]
    pub const fn safety_limit(&self) -> f64 {
        self.metal.safety_limit()
    }

    #[must_use]
    pub fn exceeds_limit(&self) -> bool {
        self.amount_detected > self.safety_limit()
    }
}
