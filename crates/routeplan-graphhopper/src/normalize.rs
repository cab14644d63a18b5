//! Conversion from GraphHopper wire types into routeplan domain types.

use routeplan_core::{GeocodedPoint, Instruction, RouteResult, SegmentInterval};

use crate::types::{GeocodeHit, RoutePath};

#[must_use]
pub fn geocoded_point(hit: &GeocodeHit) -> GeocodedPoint {
    GeocodedPoint {
        latitude: hit.point.lat,
        longitude: hit.point.lng,
        display_name: hit.display_name(),
    }
}

/// Normalises one path. Coordinates arrive as `[lon, lat]`; malformed ones
/// are dropped, and step intervals are clamped into the resulting geometry.
#[must_use]
pub fn path_to_route(path: &RoutePath) -> RouteResult {
    let geometry = path.points.to_points();
    if geometry.len() != path.points.coordinates.len() {
        tracing::warn!(
            received = path.points.coordinates.len(),
            kept = geometry.len(),
            "path_to_route: dropped malformed coordinates"
        );
    }

    let steps = path
        .instructions
        .iter()
        .map(|raw| Instruction {
            text: raw.text.clone(),
            distance_meters: raw.distance,
            interval: SegmentInterval::new(raw.interval[0], raw.interval[1]),
        })
        .collect();

    RouteResult::new(geometry, path.distance, path.time, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HitPoint, RawInstruction};
    use routeplan_core::api::LineString;

    #[test]
    fn path_to_route_keeps_totals_and_order() {
        let path = RoutePath {
            distance: 55_200.0,
            time: 5_025_000,
            points: LineString {
                coordinates: vec![vec![120.98, 14.59], vec![120.95, 14.3], vec![120.93, 14.1]],
            },
            instructions: vec![
                RawInstruction {
                    text: "Head south".to_string(),
                    distance: 30_000.0,
                    interval: [0, 1],
                    time: 0,
                    sign: 0,
                },
                RawInstruction {
                    text: "Arrive at destination".to_string(),
                    distance: 0.0,
                    interval: [2, 2],
                    time: 0,
                    sign: 4,
                },
            ],
        };

        let route = path_to_route(&path);
        assert_eq!(route.geometry().len(), 3);
        assert!((route.geometry()[0].lat - 14.59).abs() < f64::EPSILON);
        assert_eq!(route.total_duration_millis(), 5_025_000);
        assert_eq!(route.steps()[0].text, "Head south");
        assert_eq!(route.steps()[1].interval, SegmentInterval::new(2, 2));
    }

    #[test]
    fn geocoded_point_uses_first_hit_fields() {
        let hit = GeocodeHit {
            point: HitPoint {
                lat: 14.5995,
                lng: 120.9842,
            },
            name: "Manila".to_string(),
            state: Some("Metro Manila".to_string()),
            country: Some("Philippines".to_string()),
            osm_value: Some("city".to_string()),
        };
        let p = geocoded_point(&hit);
        assert!((p.latitude - 14.5995).abs() < f64::EPSILON);
        assert_eq!(p.display_name, "Manila, Metro Manila, Philippines");
    }
}
