//! Geocoding endpoints for the GraphHopper client.

use routeplan_core::GeocodedPoint;

use crate::client::GraphHopperClient;
use crate::error::GraphHopperError;
use crate::normalize::geocoded_point;
use crate::types::GeocodeResponse;

/// Suggestions returned by [`GraphHopperClient::autocomplete`].
const AUTOCOMPLETE_LIMIT: u32 = 5;

impl GraphHopperClient {
    /// Looks up a free-text place name, returning up to `limit` hits in
    /// provider ranking order.
    ///
    /// # Errors
    ///
    /// - [`GraphHopperError::Api`] on a non-2xx status or payload error.
    /// - [`GraphHopperError::Http`] on network failure.
    /// - [`GraphHopperError::Deserialize`] if the response shape is unexpected.
    pub async fn geocode(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<GeocodeResponse, GraphHopperError> {
        self.geocode_with(query, limit, false).await
    }

    /// Resolves a place name to its highest-ranked match.
    ///
    /// # Errors
    ///
    /// - [`GraphHopperError::NoHits`] if the provider returns zero hits.
    /// - Any error from [`GraphHopperClient::geocode`].
    pub async fn geocode_first(&self, query: &str) -> Result<GeocodedPoint, GraphHopperError> {
        let response = self.geocode(query, 1).await?;
        let hit = response
            .hits
            .first()
            .ok_or_else(|| GraphHopperError::NoHits {
                query: query.to_string(),
            })?;
        let point = geocoded_point(hit);
        tracing::debug!(
            query,
            lat = point.latitude,
            lng = point.longitude,
            name = %point.display_name,
            "geocoded place"
        );
        Ok(point)
    }

    /// Returns up to five place-name suggestions for a partial query.
    ///
    /// # Errors
    ///
    /// Same as [`GraphHopperClient::geocode`].
    pub async fn autocomplete(&self, prefix: &str) -> Result<Vec<String>, GraphHopperError> {
        let response = self.geocode_with(prefix, AUTOCOMPLETE_LIMIT, true).await?;
        Ok(response.hits.into_iter().map(|h| h.name).collect())
    }

    async fn geocode_with(
        &self,
        query: &str,
        limit: u32,
        autocomplete: bool,
    ) -> Result<GeocodeResponse, GraphHopperError> {
        let limit = limit.to_string();
        let mut params = vec![("q", query), ("limit", limit.as_str())];
        if let Some(country) = self.country.as_deref() {
            params.push(("country", country));
        }
        if autocomplete {
            params.push(("autocomplete", "true"));
        }
        let url = self.build_url("geocode", &params);
        self.request_json(url, "geocode").await
    }
}
