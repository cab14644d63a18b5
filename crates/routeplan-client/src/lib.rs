//! Route request orchestration: resolves place names, fetches a route from an
//! injected provider, keeps the session's display model, and drives a
//! rendering collaborator. Requests are sequenced so a superseded or
//! cancelled chain can never overwrite newer state.

pub mod backend;
pub mod direct;
pub mod display;
mod error;
mod orchestrator;
pub mod provider;
pub mod render;
mod session;

pub use backend::{BackendClient, BackendSetupError};
pub use direct::DirectProvider;
pub use display::{DisplayModel, SegmentHighlight, StepLine};
pub use error::RouteError;
pub use orchestrator::{Orchestrator, RouteInput, DEFAULT_REQUEST_TIMEOUT};
pub use provider::{
    AnalyticsSource, FavoritesStore, Geocoder, PlaceSuggester, Providers, RouteProvider,
};
pub use render::RouteRenderer;
pub use session::{RequestToken, SessionState};
