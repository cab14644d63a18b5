//! HTTP client for the routeplan backend proxy.
//!
//! The backend answers failures with `{"error": message, "code": code}`;
//! the message is surfaced to the user verbatim unless the code maps onto
//! a specific [`RouteError`] kind.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use routeplan_core::api::{ErrorBody, FavoriteCreated, RouteByNameRequest, RouteSummary};
use routeplan_core::{
    AnalyticsSeries, FavoriteDraft, FavoriteRecord, GeocodedPoint, PlaceQuery, RouteRequest,
    RouteResult, Waypoint,
};
use routeplan_graphhopper::{geocoded_point, path_to_route, GeocodeResponse, RouteResponse};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::provider::{AnalyticsSource, FavoritesStore, Geocoder, PlaceSuggester, RouteProvider};
use crate::RouteError;

#[derive(Debug, Error)]
pub enum BackendSetupError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// # Errors
    ///
    /// Returns [`BackendSetupError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`BackendSetupError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, BackendSetupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| BackendSetupError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    fn url(&self, endpoint: &str) -> Result<Url, RouteError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| RouteError::Provider(format!("invalid backend endpoint {endpoint}: {e}")))
    }

    /// Sends a request and decodes a success body into `T`.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, RouteError> {
        let body = self.send(request, context).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(context, error = %e, "unexpected backend response body");
            RouteError::Provider(format!("Unexpected {context} response from the backend."))
        })
    }

    /// Sends a request and returns the raw success body. Non-success
    /// statuses become errors carrying the backend's message.
    async fn send(&self, request: RequestBuilder, context: &str) -> Result<String, RouteError> {
        tracing::debug!(context, "backend request");
        let response = request.send().await.map_err(|e| transport_error(&e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(&e))?;

        if status.is_success() {
            return Ok(body);
        }

        tracing::warn!(context, status = status.as_u16(), "backend returned an error");
        Err(status_error(status, &body))
    }
}

fn transport_error(error: &reqwest::Error) -> RouteError {
    if error.is_timeout() {
        RouteError::Timeout
    } else {
        RouteError::Provider(format!("Could not contact the routeplan backend: {error}"))
    }
}

fn status_error(status: StatusCode, body: &str) -> RouteError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    match parsed.as_ref().and_then(|b| b.code.as_deref()) {
        Some("no_route") => return RouteError::NoRouteFound,
        Some("upstream_timeout") => return RouteError::Timeout,
        Some("place_not_found") => {
            let place = parsed
                .as_ref()
                .and_then(|b| b.place.clone())
                .unwrap_or_else(|| "unknown place".to_string());
            return RouteError::NotFound(place);
        }
        _ => {}
    }
    if status == StatusCode::GATEWAY_TIMEOUT {
        return RouteError::Timeout;
    }
    RouteError::Provider(
        parsed
            .map(|b| b.error)
            .unwrap_or_else(|| format!("The backend returned HTTP {}.", status.as_u16())),
    )
}

#[async_trait]
impl Geocoder for BackendClient {
    async fn geocode(&self, query: &PlaceQuery) -> Result<GeocodedPoint, RouteError> {
        let request = self
            .client
            .get(self.url("api/geocode")?)
            .query(&[("q", query.as_str())]);
        let response: GeocodeResponse = self.send_json(request, "geocode").await?;
        response
            .hits
            .first()
            .map(geocoded_point)
            .ok_or_else(|| RouteError::NotFound(query.to_string()))
    }
}

#[async_trait]
impl RouteProvider for BackendClient {
    fn accepts_place_names(&self) -> bool {
        true
    }

    /// Two resolved points go through `/api/route`; anything else is sent
    /// by name to `/get_route`, which geocodes on the server.
    async fn route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        if let (Waypoint::Point(from), Waypoint::Point(to)) =
            (&request.origin, &request.destination)
        {
            let orig = from.lat_lon().to_query_value();
            let dest = to.lat_lon().to_query_value();
            let http = self.client.get(self.url("api/route")?).query(&[
                ("orig", orig.as_str()),
                ("dest", dest.as_str()),
                ("vehicle", request.travel_mode.profile()),
            ]);
            let response: RouteResponse = self.send_json(http, "route").await?;
            let path = response.paths.first().ok_or(RouteError::NoRouteFound)?;
            return Ok(path_to_route(path));
        }

        let body = RouteByNameRequest {
            from: Some(request.origin.label().to_string()),
            to: Some(request.destination.label().to_string()),
            vehicle: Some(request.travel_mode.profile().to_string()),
            unit: Some(request.unit_system.symbol().to_string()),
        };
        let http = self.client.post(self.url("get_route")?).json(&body);
        let summary: RouteSummary = self.send_json(http, "get_route").await?;
        Ok(summary.to_route_result())
    }
}

#[async_trait]
impl PlaceSuggester for BackendClient {
    async fn suggest(&self, prefix: &str) -> Result<Vec<String>, RouteError> {
        let request = self
            .client
            .get(self.url("autocomplete")?)
            .query(&[("q", prefix)]);
        self.send_json(request, "autocomplete").await
    }
}

#[async_trait]
impl FavoritesStore for BackendClient {
    async fn save(&self, draft: &FavoriteDraft) -> Result<i64, RouteError> {
        let request = self.client.post(self.url("favorites")?).json(draft);
        let created: FavoriteCreated = self.send_json(request, "favorites").await?;
        tracing::info!(id = created.id, message = %created.message, "favorite saved");
        Ok(created.id)
    }

    async fn list(&self) -> Result<Vec<FavoriteRecord>, RouteError> {
        let request = self.client.get(self.url("favorites")?);
        self.send_json(request, "favorites").await
    }

    async fn delete(&self, id: i64) -> Result<(), RouteError> {
        let request = self.client.delete(self.url(&format!("favorites/{id}"))?);
        self.send(request, "favorites").await?;
        Ok(())
    }
}

#[async_trait]
impl AnalyticsSource for BackendClient {
    async fn analytics(&self) -> Result<AnalyticsSeries, RouteError> {
        let request = self.client.get(self.url("analytics_data")?);
        self.send_json(request, "analytics").await
    }
}
