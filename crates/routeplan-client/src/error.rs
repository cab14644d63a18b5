use thiserror::Error;

/// Failure of one orchestrator operation.
///
/// `Display` is the single human-readable message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// A required field is empty or a request is not possible in the
    /// current session state.
    #[error("{0}")]
    Validation(String),

    /// The geocoder returned zero matches for the query.
    #[error("Could not find location: {0}")]
    NotFound(String),

    #[error("No route found between these points.")]
    NoRouteFound,

    /// Non-success status, payload-level error, or transport failure from
    /// any external call. Carries the provider's message verbatim when one
    /// was given.
    #[error("{0}")]
    Provider(String),

    #[error("The request took too long to complete. Please try again.")]
    Timeout,

    /// The chain was superseded by a newer request or cancelled by a clear.
    /// Never shown to the user.
    #[error("request was superseded by a newer one")]
    Stale,
}

impl RouteError {
    #[must_use]
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, RouteError::Stale)
    }
}
