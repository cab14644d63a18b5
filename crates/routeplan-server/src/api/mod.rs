mod analytics;
mod autocomplete;
mod favorites;
mod passthrough;
mod route;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use routeplan_core::api::ErrorBody;
use routeplan_graphhopper::{GraphHopperClient, GraphHopperError};
use serde::Serialize;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub graphhopper: Arc<GraphHopperClient>,
    /// Largest latitude or longitude difference accepted between the two
    /// geocoded ends of a `/get_route` request.
    pub max_point_spread_deg: f64,
}

/// A failed request. Rendered as `{"error": message, "code": code}`, plus
/// `"place"` when set, with the status derived from `code`.
#[derive(Debug)]
pub struct ApiError {
    pub code: &'static str,
    pub message: String,
    pub place: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ApiError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            place: None,
        }
    }

    /// Geocoding succeeded but matched nothing for `place`.
    pub fn place_not_found(place: &str, message: impl Into<String>) -> Self {
        Self {
            place: Some(place.to_string()),
            ..Self::new("place_not_found", message)
        }
    }

    fn status(&self) -> StatusCode {
        match self.code {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" | "geocode_failed" | "place_not_found"
            | "no_route" | "upstream_rejected" => StatusCode::BAD_REQUEST,
            "upstream_timeout" => StatusCode::GATEWAY_TIMEOUT,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message,
            code: Some(self.code.to_string()),
            place: self.place,
        };
        (status, Json(body)).into_response()
    }
}

pub(super) const NO_ROUTE_MESSAGE: &str = "No route found between these points.";

pub(super) fn map_db_error(error: &routeplan_db::DbError) -> ApiError {
    tracing::error!(error = %error, "database query failed");
    ApiError::new("internal_error", "database query failed")
}

/// Maps a GraphHopper failure onto the backend's status conventions:
/// timeouts are 504, provider rejections of the request are 400 with the
/// provider's message, everything else upstream is 502.
pub(super) fn map_graphhopper_error(error: &GraphHopperError) -> ApiError {
    if error.is_timeout() {
        tracing::warn!(error = %error, "routing service timed out");
        return ApiError::new(
            "upstream_timeout",
            "The routing service took too long to respond. Please try again.",
        );
    }
    match error {
        GraphHopperError::NoPath => ApiError::new("no_route", NO_ROUTE_MESSAGE),
        GraphHopperError::NoHits { query } => {
            ApiError::place_not_found(query, format!("Could not find location: {query}"))
        }
        GraphHopperError::Api { status, message } if (400..500).contains(status) => {
            ApiError::new("upstream_rejected", message.clone())
        }
        GraphHopperError::InvalidBaseUrl { .. } => {
            tracing::error!(error = %error, "routing client misconfigured");
            ApiError::new("internal_error", "routing client misconfigured")
        }
        other => {
            tracing::warn!(error = %other, "routing service request failed");
            ApiError::new(
                "upstream_error",
                format!("Could not contact the routing service: {other}"),
            )
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/get_route", post(route::get_route))
        .route("/api/geocode", get(passthrough::geocode))
        .route("/api/route", get(passthrough::route))
        .route("/autocomplete", get(autocomplete::autocomplete))
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::create_favorite),
        )
        .route("/favorites/{id}", delete(favorites::delete_favorite))
        .route("/analytics", get(analytics::analytics))
        .route("/analytics_data", get(analytics::analytics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match routeplan_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthData {
                status: "ok",
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthData {
                    status: "degraded",
                    database: "unavailable",
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests;
