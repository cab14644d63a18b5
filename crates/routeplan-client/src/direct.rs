//! Provider that calls GraphHopper directly with the user's API key.

use async_trait::async_trait;
use routeplan_core::{GeocodedPoint, LatLon, PlaceQuery, RouteRequest, RouteResult, Waypoint};
use routeplan_graphhopper::{GraphHopperClient, GraphHopperError};

use crate::provider::{Geocoder, PlaceSuggester, RouteProvider};
use crate::RouteError;

impl From<GraphHopperError> for RouteError {
    fn from(error: GraphHopperError) -> Self {
        if error.is_timeout() {
            return RouteError::Timeout;
        }
        match error {
            GraphHopperError::NoHits { query } => RouteError::NotFound(query),
            GraphHopperError::NoPath => RouteError::NoRouteFound,
            GraphHopperError::Api { message, .. } => RouteError::Provider(message),
            GraphHopperError::Http(e) => {
                RouteError::Provider(format!("Could not contact the routing service: {e}"))
            }
            GraphHopperError::Deserialize { context, .. } => RouteError::Provider(format!(
                "Unexpected {context} response from the routing service."
            )),
            other @ GraphHopperError::InvalidBaseUrl { .. } => {
                RouteError::Provider(other.to_string())
            }
        }
    }
}

pub struct DirectProvider {
    client: GraphHopperClient,
}

impl DirectProvider {
    #[must_use]
    pub fn new(client: GraphHopperClient) -> Self {
        Self { client }
    }
}

/// Coordinates of a waypoint this provider can route from. Place names must
/// have been geocoded by the orchestrator first.
fn resolved(waypoint: &Waypoint) -> Result<LatLon, RouteError> {
    match waypoint {
        Waypoint::Point(point) => Ok(point.lat_lon()),
        Waypoint::Query(query) => Err(RouteError::Validation(format!(
            "'{query}' must be geocoded before routing"
        ))),
    }
}

#[async_trait]
impl Geocoder for DirectProvider {
    async fn geocode(&self, query: &PlaceQuery) -> Result<GeocodedPoint, RouteError> {
        Ok(self.client.geocode_first(query.as_str()).await?)
    }
}

#[async_trait]
impl RouteProvider for DirectProvider {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError> {
        let from = resolved(&request.origin)?;
        let to = resolved(&request.destination)?;
        Ok(self.client.route_first(from, to, request.travel_mode).await?)
    }
}

#[async_trait]
impl PlaceSuggester for DirectProvider {
    async fn suggest(&self, prefix: &str) -> Result<Vec<String>, RouteError> {
        Ok(self.client.autocomplete(prefix).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphhopper_errors_map_to_route_errors() {
        assert_eq!(
            RouteError::from(GraphHopperError::NoHits {
                query: "Atlantis".to_string()
            }),
            RouteError::NotFound("Atlantis".to_string())
        );
        assert_eq!(
            RouteError::from(GraphHopperError::NoPath),
            RouteError::NoRouteFound
        );
        assert_eq!(
            RouteError::from(GraphHopperError::Api {
                status: 401,
                message: "Wrong credentials".to_string()
            }),
            RouteError::Provider("Wrong credentials".to_string())
        );
    }

    #[test]
    fn unresolved_waypoint_is_rejected() {
        let query = PlaceQuery::new("Manila").unwrap();
        assert!(matches!(
            resolved(&Waypoint::Query(query)),
            Err(RouteError::Validation(_))
        ));
    }
}
