//! Saved "favorite" routes as exchanged with the favorites store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation payload for `POST /favorites`.
///
/// `distance` and `time` carry the formatted display strings of the route
/// (`"12.34 km"`, `"1h 2m 3s"`), not raw numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteDraft {
    pub name: String,
    pub from: String,
    pub to: String,
    pub vehicle: String,
    pub unit: String,
    pub distance: String,
    pub time: String,
}

impl FavoriteDraft {
    /// Names of required fields that are blank after trimming.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("from", &self.from),
            ("to", &self.to),
            ("distance", &self.distance),
            ("time", &self.time),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }
}

/// A stored favorite as listed by `GET /favorites`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: i64,
    pub name: String,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    pub distance: String,
    pub time: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> FavoriteDraft {
        FavoriteDraft {
            name: "Weekend".to_string(),
            from: "Manila".to_string(),
            to: "Tagaytay".to_string(),
            vehicle: "car".to_string(),
            unit: "km".to_string(),
            distance: "55.20 km".to_string(),
            time: "1h 30m 0s".to_string(),
        }
    }

    #[test]
    fn complete_draft_has_no_missing_fields() {
        assert!(draft().missing_fields().is_empty());
    }

    #[test]
    fn blank_fields_are_reported() {
        let mut d = draft();
        d.name = "  ".to_string();
        d.time = String::new();
        assert_eq!(d.missing_fields(), vec!["name", "time"]);
    }

    #[test]
    fn record_accepts_minimal_listing_shape() {
        let json = serde_json::json!({
            "id": 3,
            "name": "Commute",
            "origin": "A",
            "destination": "B",
            "distance": "10 km",
            "time": "15m 0s"
        });
        let rec: FavoriteRecord = serde_json::from_value(json).unwrap();
        assert_eq!(rec.id, 3);
        assert!(rec.vehicle.is_none());
        assert!(rec.created_at.is_none());
    }
}
