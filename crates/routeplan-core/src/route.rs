//! Places, route requests and route results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::travel::TravelMode;
use crate::units::UnitSystem;
use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a point from a GeoJSON-ordered `[lon, lat, ...]` coordinate.
    /// Returns `None` when fewer than two components are present.
    #[must_use]
    pub fn from_lon_lat(coordinate: &[f64]) -> Option<Self> {
        match coordinate {
            [lon, lat, ..] => Some(Self::new(*lat, *lon)),
            _ => None,
        }
    }

    /// `"lat,lon"` as expected by query-string point parameters.
    #[must_use]
    pub fn to_query_value(self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// Free-text place name entered by the user, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyPlaceQuery`] when the trimmed input is empty.
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyPlaceQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlaceQuery {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<PlaceQuery> for String {
    fn from(value: PlaceQuery) -> Self {
        value.0
    }
}

impl fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl GeocodedPoint {
    #[must_use]
    pub fn lat_lon(&self) -> LatLon {
        LatLon::new(self.latitude, self.longitude)
    }
}

/// One end of a route: either already resolved, or a name still to be geocoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Waypoint {
    Point(GeocodedPoint),
    Query(PlaceQuery),
}

impl Waypoint {
    /// Human-readable label: the geocoded display name, or the raw query.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Waypoint::Point(p) => &p.display_name,
            Waypoint::Query(q) => q.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub travel_mode: TravelMode,
    pub unit_system: UnitSystem,
}

/// Inclusive `[start, end]` index range into a route's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentInterval {
    pub start: usize,
    pub end: usize,
}

impl SegmentInterval {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Clamps both indices into `[0, len - 1]` and forces `start <= end`.
    /// With `len == 0` the result is `(0, 0)`.
    #[must_use]
    pub fn clamped(self, len: usize) -> Self {
        let last = len.saturating_sub(1);
        let end = self.end.min(last);
        let start = self.start.min(end);
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub text: String,
    pub distance_meters: f64,
    pub interval: SegmentInterval,
}

/// A normalised route: first path of the provider's answer.
///
/// Fields are private so the interval invariant
/// `0 <= start <= end < geometry.len()` cannot be broken after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    geometry: Vec<LatLon>,
    total_distance_meters: f64,
    total_duration_millis: u64,
    steps: Vec<Instruction>,
}

impl RouteResult {
    /// Builds a result, clamping every step's interval into the geometry.
    #[must_use]
    pub fn new(
        geometry: Vec<LatLon>,
        total_distance_meters: f64,
        total_duration_millis: u64,
        steps: Vec<Instruction>,
    ) -> Self {
        let len = geometry.len();
        let steps = steps
            .into_iter()
            .map(|mut step| {
                step.interval = step.interval.clamped(len);
                step
            })
            .collect();
        Self {
            geometry,
            total_distance_meters,
            total_duration_millis,
            steps,
        }
    }

    #[must_use]
    pub fn geometry(&self) -> &[LatLon] {
        &self.geometry
    }

    #[must_use]
    pub fn total_distance_meters(&self) -> f64 {
        self.total_distance_meters
    }

    #[must_use]
    pub fn total_duration_millis(&self) -> u64 {
        self.total_duration_millis
    }

    #[must_use]
    pub fn steps(&self) -> &[Instruction] {
        &self.steps
    }

    /// The inclusive geometry slice covered by `interval`; empty when the
    /// route has no geometry.
    #[must_use]
    pub fn segment(&self, interval: SegmentInterval) -> &[LatLon] {
        if self.geometry.is_empty() {
            return &[];
        }
        let SegmentInterval { start, end } = interval.clamped(self.geometry.len());
        &self.geometry[start..=end]
    }
}
