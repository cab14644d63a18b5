//! Fixed coordinates for a few demo places, used when geocoding fails.

use routeplan_core::GeocodedPoint;

const DEMO_LOCATIONS: &[(&str, f64, f64)] = &[
    ("batangas city", 13.7565, 121.0583),
    ("luisiana, laguna", 14.1726, 121.5048),
    ("manila", 14.5995, 120.9842),
];

/// Case-insensitive lookup on the trimmed name.
pub fn lookup(name: &str) -> Option<GeocodedPoint> {
    let key = name.trim().to_lowercase();
    DEMO_LOCATIONS
        .iter()
        .find(|(known, _, _)| *known == key)
        .map(|&(_, latitude, longitude)| GeocodedPoint {
            latitude,
            longitude,
            display_name: name.trim().to_string(),
        })
}
