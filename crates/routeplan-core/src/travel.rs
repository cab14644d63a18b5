use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// How the traveller moves. Serialized with the routing provider's profile names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TravelMode {
    #[default]
    #[serde(rename = "car", alias = "driving")]
    Driving,
    #[serde(rename = "bike", alias = "cycling")]
    Cycling,
    #[serde(rename = "foot", alias = "walking")]
    Walking,
}

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [TravelMode::Driving, TravelMode::Cycling, TravelMode::Walking];

    /// Provider profile name (`car`, `bike`, `foot`). Also used, lower-case,
    /// as the `vehicle` field of saved favorites and route history.
    #[must_use]
    pub fn profile(self) -> &'static str {
        match self {
            TravelMode::Driving => "car",
            TravelMode::Cycling => "bike",
            TravelMode::Walking => "foot",
        }
    }

    /// Capitalised label for display, e.g. `Car`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Driving => "Car",
            TravelMode::Cycling => "Bike",
            TravelMode::Walking => "Foot",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile())
    }
}

impl FromStr for TravelMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" | "driving" | "drive" => Ok(TravelMode::Driving),
            "bike" | "bicycle" | "cycling" => Ok(TravelMode::Cycling),
            "foot" | "walk" | "walking" => Ok(TravelMode::Walking),
            other => Err(CoreError::InvalidTravelMode(other.to_string())),
        }
    }
}
