//! Collaborator seams of the orchestrator. Each is implemented by the
//! backend proxy client and, for geocoding and routing, by the direct
//! GraphHopper provider.

use std::sync::Arc;

use async_trait::async_trait;
use routeplan_core::{
    AnalyticsSeries, FavoriteDraft, FavoriteRecord, GeocodedPoint, PlaceQuery, RouteRequest,
    RouteResult,
};

use crate::backend::BackendClient;
use crate::direct::DirectProvider;
use crate::RouteError;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns the highest-ranked match, or [`RouteError::NotFound`].
    async fn geocode(&self, query: &PlaceQuery) -> Result<GeocodedPoint, RouteError>;
}

#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// `true` when [`RouteProvider::route`] resolves `Waypoint::Query`
    /// itself. Otherwise the orchestrator geocodes both ends first.
    fn accepts_place_names(&self) -> bool {
        false
    }

    /// Returns the first (best-ranked) path, or [`RouteError::NoRouteFound`].
    async fn route(&self, request: &RouteRequest) -> Result<RouteResult, RouteError>;
}

#[async_trait]
pub trait PlaceSuggester: Send + Sync {
    async fn suggest(&self, prefix: &str) -> Result<Vec<String>, RouteError>;
}

#[async_trait]
pub trait FavoritesStore: Send + Sync {
    async fn save(&self, draft: &FavoriteDraft) -> Result<i64, RouteError>;
    async fn list(&self) -> Result<Vec<FavoriteRecord>, RouteError>;
    async fn delete(&self, id: i64) -> Result<(), RouteError>;
}

#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn analytics(&self) -> Result<AnalyticsSeries, RouteError>;
}

/// The full set of collaborators one orchestrator talks to.
#[derive(Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn Geocoder>,
    pub router: Arc<dyn RouteProvider>,
    pub suggester: Arc<dyn PlaceSuggester>,
    pub favorites: Arc<dyn FavoritesStore>,
    pub analytics: Arc<dyn AnalyticsSource>,
}

impl Providers {
    /// Everything goes through the routeplan backend, which also resolves
    /// place names during routing.
    #[must_use]
    pub fn backend(client: Arc<BackendClient>) -> Self {
        Self {
            geocoder: client.clone(),
            router: client.clone(),
            suggester: client.clone(),
            favorites: client.clone(),
            analytics: client,
        }
    }

    /// Geocoding, routing and suggestions go straight to GraphHopper;
    /// favorites and analytics still need the backend.
    #[must_use]
    pub fn direct(direct: Arc<DirectProvider>, backend: Arc<BackendClient>) -> Self {
        Self {
            geocoder: direct.clone(),
            router: direct.clone(),
            suggester: direct,
            favorites: backend.clone(),
            analytics: backend,
        }
    }
}
