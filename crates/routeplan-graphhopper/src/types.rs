//! GraphHopper API response types.
//!
//! Only the fields routeplan reads are modelled; unknown fields are ignored.
//! The types also serialize, so the backend can pass them through unchanged.

use routeplan_core::api::LineString;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// geocode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub hits: Vec<GeocodeHit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeHit {
    pub point: HitPoint,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osm_value: Option<String>,
}

impl GeocodeHit {
    /// `"name, state, country"` with empty parts left out.
    #[must_use]
    pub fn display_name(&self) -> String {
        [
            Some(self.name.as_str()),
            self.state.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

// ---------------------------------------------------------------------------
// route
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub paths: Vec<RoutePath>,
}

/// One candidate path. Requested with `points_encoded=false`, so `points`
/// is a GeoJSON `LineString`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePath {
    /// Metres.
    pub distance: f64,
    /// Milliseconds.
    pub time: u64,
    #[serde(default)]
    pub points: LineString,
    #[serde(default)]
    pub instructions: Vec<RawInstruction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInstruction {
    pub text: String,
    /// Metres.
    pub distance: f64,
    #[serde(default)]
    pub interval: [usize; 2],
    #[serde(default)]
    pub time: u64,
    #[serde(default)]
    pub sign: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(name: &str, state: Option<&str>, country: Option<&str>) -> GeocodeHit {
        GeocodeHit {
            point: HitPoint { lat: 0.0, lng: 0.0 },
            name: name.to_string(),
            state: state.map(str::to_string),
            country: country.map(str::to_string),
            osm_value: None,
        }
    }

    #[test]
    fn display_name_joins_present_parts() {
        assert_eq!(
            hit("Tagaytay", Some("Cavite"), Some("Philippines")).display_name(),
            "Tagaytay, Cavite, Philippines"
        );
        assert_eq!(
            hit("Manila", None, Some("Philippines")).display_name(),
            "Manila, Philippines"
        );
        assert_eq!(hit("Manila", Some(""), None).display_name(), "Manila");
    }

    #[test]
    fn path_defaults_missing_instructions() {
        let json = serde_json::json!({
            "distance": 12.5,
            "time": 1000,
            "points": {"type": "LineString", "coordinates": [[121.0, 14.0], [121.1, 14.1]]}
        });
        let path: RoutePath = serde_json::from_value(json).unwrap();
        assert!(path.instructions.is_empty());
        assert_eq!(path.points.coordinates.len(), 2);
    }
}
