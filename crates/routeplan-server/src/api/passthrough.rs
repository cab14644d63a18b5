//! Thin proxies over the GraphHopper geocode and route endpoints, so clients
//! never hold the API key.

use axum::{
    extract::{Query, State},
    Json,
};
use routeplan_core::{LatLon, TravelMode};
use routeplan_graphhopper::{GeocodeResponse, RouteResponse};
use serde::Deserialize;

use super::{map_graphhopper_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct GeocodeQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RouteQuery {
    pub orig: Option<String>,
    pub dest: Option<String>,
    pub vehicle: Option<String>,
}

/// Parses a `"lat,lng"` query value.
fn parse_point(raw: &str) -> Option<LatLon> {
    let (lat, lon) = raw.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    (lat.is_finite() && lon.is_finite()).then(|| LatLon::new(lat, lon))
}

fn required_point(name: &str, raw: Option<&str>) -> Result<LatLon, ApiError> {
    let raw = raw.ok_or_else(|| {
        ApiError::new("validation_error", format!("Missing query parameter: {name}"))
    })?;
    parse_point(raw).ok_or_else(|| {
        ApiError::new(
            "validation_error",
            format!("Invalid {name}: expected \"lat,lng\", got \"{raw}\""),
        )
    })
}

pub(super) async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(ApiError::new("validation_error", "Missing query parameter: q"));
    }

    let response = state
        .graphhopper
        .geocode(q, 1)
        .await
        .map_err(|e| map_graphhopper_error(&e))?;
    Ok(Json(response))
}

pub(super) async fn route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, ApiError> {
    let orig = required_point("orig", query.orig.as_deref())?;
    let dest = required_point("dest", query.dest.as_deref())?;
    let mode = match query.vehicle.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<TravelMode>()
            .map_err(|e| ApiError::new("validation_error", e.to_string()))?,
        _ => TravelMode::default(),
    };

    let response = state
        .graphhopper
        .route(orig, dest, mode.profile())
        .await
        .map_err(|e| map_graphhopper_error(&e))?;
    Ok(Json(response))
}
