//! Distance units and the single conversion constant used everywhere.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Kilometres in one statute mile.
pub const KM_PER_MILE: f64 = 1.609_34;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    #[serde(rename = "km", alias = "metric")]
    Metric,
    #[serde(rename = "mi", alias = "miles", alias = "imperial")]
    Imperial,
}

impl UnitSystem {
    /// Short unit label shown next to distances.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }

    /// Converts metres into this unit system's display unit.
    #[must_use]
    pub fn from_meters(self, meters: f64) -> f64 {
        let km = meters / 1000.0;
        match self {
            UnitSystem::Metric => km,
            UnitSystem::Imperial => km / KM_PER_MILE,
        }
    }

    /// Formats metres with two decimals and the unit symbol, e.g. `"12.34 km"`.
    #[must_use]
    pub fn format_meters(self, meters: f64) -> String {
        format!("{:.2} {}", self.from_meters(meters), self.symbol())
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for UnitSystem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "metric" | "m" | "kilometers" | "kilometres" => Ok(UnitSystem::Metric),
            "mi" | "mile" | "miles" | "imperial" | "i" => Ok(UnitSystem::Imperial),
            other => Err(CoreError::InvalidUnit(other.to_string())),
        }
    }
}
