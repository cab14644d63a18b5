//! Shared domain types for routeplan: places, routes, instructions, units,
//! travel modes, favorites, analytics, and the env-driven application config.

pub mod analytics;
pub mod api;
mod app_config;
mod config;
pub mod duration;
pub mod favorites;
pub mod route;
pub mod travel;
pub mod units;

use thiserror::Error;

pub use analytics::{AnalyticsSeries, RouteCount};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use duration::TripDuration;
pub use favorites::{FavoriteDraft, FavoriteRecord};
pub use route::{
    GeocodedPoint, Instruction, LatLon, PlaceQuery, RouteRequest, RouteResult, SegmentInterval,
    Waypoint,
};
pub use travel::TravelMode;
pub use units::UnitSystem;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("place query must not be empty")]
    EmptyPlaceQuery,

    #[error("unknown travel mode: {0}")]
    InvalidTravelMode(String),

    #[error("unknown unit system: {0}")]
    InvalidUnit(String),
}
