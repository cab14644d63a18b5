//! Request and response bodies exchanged with the routeplan backend.

use serde::{Deserialize, Serialize};

use crate::route::{Instruction, LatLon, RouteResult, SegmentInterval};

/// Body of `POST /get_route`. Fields are optional on the wire so the server
/// can answer missing ones with a readable 400 instead of a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteByNameRequest {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionSummary {
    pub text: String,
    /// Formatted in the requested unit, e.g. `"1.20 km"`.
    pub distance: String,
    pub distance_meters: f64,
    pub interval: [usize; 2],
}

/// GeoJSON `LineString` geometry; coordinates are `[lon, lat]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineString {
    #[serde(default)]
    pub coordinates: Vec<Vec<f64>>,
}

impl LineString {
    #[must_use]
    pub fn from_points(points: &[LatLon]) -> Self {
        Self {
            coordinates: points.iter().map(|p| vec![p.lon, p.lat]).collect(),
        }
    }

    /// Converts to `LatLon`s, skipping malformed coordinates.
    #[must_use]
    pub fn to_points(&self) -> Vec<LatLon> {
        self.coordinates
            .iter()
            .filter_map(|c| LatLon::from_lon_lat(c))
            .collect()
    }
}

/// Response of `POST /get_route`: display strings plus the raw numbers and
/// geometry a client needs to render the path and highlight steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance: String,
    pub time: String,
    pub vehicle: String,
    pub unit: String,
    pub instructions: Vec<InstructionSummary>,
    pub points: LineString,
    pub from: String,
    pub to: String,
    pub distance_meters: f64,
    pub time_ms: u64,
}

impl RouteSummary {
    #[must_use]
    pub fn to_route_result(&self) -> RouteResult {
        let steps = self
            .instructions
            .iter()
            .map(|i| Instruction {
                text: i.text.clone(),
                distance_meters: i.distance_meters,
                interval: SegmentInterval::new(i.interval[0], i.interval[1]),
            })
            .collect();
        RouteResult::new(
            self.points.to_points(),
            self.distance_meters,
            self.time_ms,
            steps,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCreated {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Error payload returned by the backend on any non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// The place name that geocoded to nothing, set with `place_not_found`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_summary_converts_geometry_and_steps() {
        let summary = RouteSummary {
            distance: "1.00 km".to_string(),
            time: "1m 0s".to_string(),
            vehicle: "Car".to_string(),
            unit: "km".to_string(),
            instructions: vec![InstructionSummary {
                text: "Head north".to_string(),
                distance: "1.00 km".to_string(),
                distance_meters: 1000.0,
                interval: [0, 5],
            }],
            points: LineString {
                coordinates: vec![vec![121.0, 14.0], vec![121.1, 14.1]],
            },
            from: "A".to_string(),
            to: "B".to_string(),
            distance_meters: 1000.0,
            time_ms: 60_000,
        };
        let result = summary.to_route_result();
        assert_eq!(result.geometry().len(), 2);
        assert!((result.geometry()[0].lat - 14.0).abs() < f64::EPSILON);
        assert_eq!(result.steps()[0].interval, SegmentInterval::new(0, 1));
        assert_eq!(result.total_duration_millis(), 60_000);
    }

    #[test]
    fn route_request_tolerates_missing_fields() {
        let req: RouteByNameRequest = serde_json::from_str(r#"{"to": "B"}"#).unwrap();
        assert!(req.from.is_none());
        assert_eq!(req.to.as_deref(), Some("B"));
    }
}
