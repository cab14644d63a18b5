use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of times one origin → destination pair was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCount {
    #[serde(alias = "route")]
    pub label: String,
    pub count: i64,
}

/// Pre-aggregated usage counts for the analytics charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSeries {
    #[serde(default)]
    pub top_routes: Vec<RouteCount>,
    #[serde(default)]
    pub vehicle_usage: BTreeMap<String, i64>,
}

impl AnalyticsSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top_routes.is_empty() && self.vehicle_usage.is_empty()
    }

    /// Label used for a route pair in `top_routes`.
    #[must_use]
    pub fn route_label(origin: &str, destination: &str) -> String {
        format!("{origin} \u{2192} {destination}")
    }
}
