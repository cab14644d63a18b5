//! `POST /get_route`: geocode two place names and route between them.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use routeplan_core::api::{InstructionSummary, LineString, RouteByNameRequest, RouteSummary};
use routeplan_core::{GeocodedPoint, LatLon, RouteResult, TravelMode, TripDuration, UnitSystem};
use routeplan_graphhopper::{path_to_route, GraphHopperError};

use crate::fallback;
use crate::middleware::RequestId;

use super::{map_graphhopper_error, ApiError, AppState, NO_ROUTE_MESSAGE};

/// Validated form of [`RouteByNameRequest`].
#[derive(Debug)]
struct RouteParams {
    from: String,
    to: String,
    mode: TravelMode,
    unit: UnitSystem,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl RouteParams {
    fn from_body(body: &RouteByNameRequest) -> Result<Self, ApiError> {
        let (from, to, vehicle) = match (
            non_blank(body.from.as_deref()),
            non_blank(body.to.as_deref()),
            non_blank(body.vehicle.as_deref()),
        ) {
            (Some(from), Some(to), Some(vehicle)) => (from, to, vehicle),
            (from, to, vehicle) => {
                let missing: Vec<&str> = [
                    ("from", from.is_none()),
                    ("to", to.is_none()),
                    ("vehicle", vehicle.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| name)
                .collect();
                return Err(ApiError::new(
                    "validation_error",
                    format!("Missing required fields: {}.", missing.join(", ")),
                ));
            }
        };

        let mode = vehicle
            .parse::<TravelMode>()
            .map_err(|e| ApiError::new("validation_error", e.to_string()))?;
        let unit = match non_blank(body.unit.as_deref()) {
            Some(raw) => raw
                .parse::<UnitSystem>()
                .map_err(|e| ApiError::new("validation_error", e.to_string()))?,
            None => UnitSystem::default(),
        };

        Ok(Self {
            from,
            to,
            mode,
            unit,
        })
    }
}

pub(super) async fn get_route(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<RouteByNameRequest>, JsonRejection>,
) -> Result<Json<RouteSummary>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::new("bad_request", e.body_text()))?;
    let params = RouteParams::from_body(&body)?;

    let origin = resolve_place(&state, &params.from).await?;
    let destination = resolve_place(&state, &params.to).await?;
    check_spread(
        origin.lat_lon(),
        destination.lat_lon(),
        state.max_point_spread_deg,
    )?;

    let response = state
        .graphhopper
        .route(
            origin.lat_lon(),
            destination.lat_lon(),
            params.mode.profile(),
        )
        .await
        .map_err(|e| map_graphhopper_error(&e))?;
    let path = response
        .paths
        .first()
        .ok_or_else(|| ApiError::new("no_route", NO_ROUTE_MESSAGE))?;
    let route = path_to_route(path);

    if let Err(e) =
        routeplan_db::record_route(&state.pool, &params.from, &params.to, params.mode.profile())
            .await
    {
        tracing::warn!(request_id = %req_id.0, error = %e, "failed to record route history");
    }

    tracing::info!(
        request_id = %req_id.0,
        from = %params.from,
        to = %params.to,
        vehicle = params.mode.profile(),
        distance_m = route.total_distance_meters(),
        "route computed"
    );

    Ok(Json(summarize(&route, &params)))
}

/// Geocodes a place name, falling back to the demo table when the provider
/// fails or has no match.
async fn resolve_place(state: &AppState, name: &str) -> Result<GeocodedPoint, ApiError> {
    let no_hits = match state.graphhopper.geocode_first(name).await {
        Ok(point) => return Ok(point),
        Err(e) => {
            tracing::warn!(query = name, error = %e, "geocoding failed, trying demo fallback");
            matches!(e, GraphHopperError::NoHits { .. })
        }
    };
    if let Some(point) = fallback::lookup(name) {
        return Ok(point);
    }
    let message = format!("Could not find location (and no fallback): {name}");
    if no_hits {
        Err(ApiError::place_not_found(name, message))
    } else {
        Err(ApiError::new("geocode_failed", message))
    }
}

fn check_spread(from: LatLon, to: LatLon, max_deg: f64) -> Result<(), ApiError> {
    if (from.lat - to.lat).abs() > max_deg || (from.lon - to.lon).abs() > max_deg {
        return Err(ApiError::new(
            "validation_error",
            "Detected locations too far apart. Please specify more clearly.",
        ));
    }
    Ok(())
}

fn summarize(route: &RouteResult, params: &RouteParams) -> RouteSummary {
    let unit = params.unit;
    RouteSummary {
        distance: unit.format_meters(route.total_distance_meters()),
        time: TripDuration::from_millis(route.total_duration_millis()).to_string(),
        vehicle: params.mode.label().to_string(),
        unit: unit.symbol().to_string(),
        instructions: route
            .steps()
            .iter()
            .map(|step| InstructionSummary {
                text: step.text.clone(),
                distance: unit.format_meters(step.distance_meters),
                distance_meters: step.distance_meters,
                interval: [step.interval.start, step.interval.end],
            })
            .collect(),
        points: LineString::from_points(route.geometry()),
        from: params.from.clone(),
        to: params.to.clone(),
        distance_meters: route.total_distance_meters(),
        time_ms: route.total_duration_millis(),
    }
}
