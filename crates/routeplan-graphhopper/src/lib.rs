//! Typed client for the GraphHopper geocoding and routing REST API.

mod client;
mod error;
mod geocode;
pub mod normalize;
mod routing;
pub mod types;

pub use client::GraphHopperClient;
pub use error::GraphHopperError;
pub use normalize::{geocoded_point, path_to_route};
pub use types::{GeocodeHit, GeocodeResponse, HitPoint, RawInstruction, RoutePath, RouteResponse};
