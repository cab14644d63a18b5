use thiserror::Error;

/// Errors returned by the GraphHopper API client.
#[derive(Debug, Error)]
pub enum GraphHopperError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status, or a payload-level `message`/`error` field.
    #[error("GraphHopper API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Geocoding returned zero hits.
    #[error("no location found for '{query}'")]
    NoHits { query: String },

    /// Routing returned zero paths.
    #[error("no route found between these points")]
    NoPath,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GraphHopperError {
    /// `true` when the request did not complete within the client timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, GraphHopperError::Http(e) if e.is_timeout())
    }
}
