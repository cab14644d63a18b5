//! HTTP client for the GraphHopper REST API.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and GraphHopper-specific error handling. Non-2xx statuses and payload-level
//! `message`/`error` fields surface as [`GraphHopperError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::GraphHopperError;

const DEFAULT_BASE_URL: &str = "https://graphhopper.com/api/1/";
const DEFAULT_USER_AGENT: &str = "routeplan/0.1 (route-planner)";

/// Client for the GraphHopper geocoding and routing endpoints.
///
/// Use [`GraphHopperClient::new`] for production or
/// [`GraphHopperClient::with_base_url`] to point at a mock server in tests.
pub struct GraphHopperClient {
    client: Client,
    api_key: String,
    base_url: Url,
    pub(crate) country: Option<String>,
}

impl GraphHopperClient {
    /// Creates a new client pointed at the public GraphHopper API.
    ///
    /// # Errors
    ///
    /// Returns [`GraphHopperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GraphHopperError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock,
    /// or a self-hosted GraphHopper).
    ///
    /// # Errors
    ///
    /// Returns [`GraphHopperError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`GraphHopperError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GraphHopperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        // Exactly one trailing slash so `Url::join` appends the endpoint
        // instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GraphHopperError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            country: None,
        })
    }

    /// Restricts geocoding to one country code (e.g. `"PH"`).
    #[must_use]
    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = country;
        self
    }

    /// Builds the full request URL with percent-encoded query parameters.
    /// `key` is always appended last. Repeated keys (e.g. `point`) are kept.
    pub(crate) fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(endpoint)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request and decodes the JSON body into `T`.
    ///
    /// `context` names the call in errors and logs; it never includes the URL,
    /// which carries the API key.
    ///
    /// # Errors
    ///
    /// - [`GraphHopperError::Http`] on network failure or timeout.
    /// - [`GraphHopperError::Api`] on a non-2xx status or payload-level error.
    /// - [`GraphHopperError::Deserialize`] if the body does not match `T`.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, GraphHopperError> {
        tracing::debug!(context, "graphhopper request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(e) if status.is_success() => {
                return Err(GraphHopperError::Deserialize {
                    context: context.to_string(),
                    source: e,
                })
            }
            Err(_) => serde_json::Value::Null,
        };

        if !status.is_success() {
            let message =
                payload_error(&value).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            tracing::warn!(context, status = status.as_u16(), %message, "graphhopper returned an error");
            return Err(GraphHopperError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if let Some(message) = payload_error(&value) {
            return Err(GraphHopperError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(value).map_err(|e| GraphHopperError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Reads a top-level `error` or `message` string, which GraphHopper uses for
/// failures.
fn payload_error(body: &serde_json::Value) -> Option<String> {
    ["error", "message"]
        .into_iter()
        .find_map(|key| body.get(key).and_then(serde_json::Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
