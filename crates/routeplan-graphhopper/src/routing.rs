//! Routing endpoint for the GraphHopper client.

use routeplan_core::{LatLon, RouteResult, TravelMode};

use crate::client::GraphHopperClient;
use crate::error::GraphHopperError;
use crate::normalize::path_to_route;
use crate::types::RouteResponse;

impl GraphHopperClient {
    /// Requests routes between two points for a provider profile
    /// (`car`, `bike`, `foot`). Returns every path the provider offers.
    ///
    /// # Errors
    ///
    /// - [`GraphHopperError::Api`] on a non-2xx status or payload error.
    /// - [`GraphHopperError::Http`] on network failure or timeout.
    /// - [`GraphHopperError::Deserialize`] if the response shape is unexpected.
    pub async fn route(
        &self,
        from: LatLon,
        to: LatLon,
        profile: &str,
    ) -> Result<RouteResponse, GraphHopperError> {
        let from = from.to_query_value();
        let to = to.to_query_value();
        let url = self.build_url(
            "route",
            &[
                ("point", from.as_str()),
                ("point", to.as_str()),
                ("profile", profile),
                ("locale", "en"),
                ("points_encoded", "false"),
                ("instructions", "true"),
            ],
        );
        self.request_json(url, "route").await
    }

    /// Routes between two points and normalises the best-ranked path.
    ///
    /// # Errors
    ///
    /// - [`GraphHopperError::NoPath`] if the provider returns zero paths.
    /// - Any error from [`GraphHopperClient::route`].
    pub async fn route_first(
        &self,
        from: LatLon,
        to: LatLon,
        mode: TravelMode,
    ) -> Result<RouteResult, GraphHopperError> {
        let response = self.route(from, to, mode.profile()).await?;
        let path = response.paths.first().ok_or(GraphHopperError::NoPath)?;
        if response.paths.len() > 1 {
            tracing::debug!(
                alternatives = response.paths.len() - 1,
                "route_first: ignoring alternative paths"
            );
        }
        Ok(path_to_route(path))
    }
}
