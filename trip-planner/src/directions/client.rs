//! Directions HTTP client.
//!
//! Issues one GET per query and hands the decoded body to the parser.
//! [`DirectionsClient::fetch`] never fails: transport errors, bad statuses
//! and undecodable bodies are logged and produce an empty result.
//! [`DirectionsClient::try_fetch`] exposes the same call with its error.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{RouteOption, TravelMode};

use super::error::DirectionsError;
use super::parse::parse_directions;

/// Default endpoint of the directions service.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Language the service renders labels and instructions in.
const DEFAULT_LANGUAGE: &str = "ko";

/// Longest body excerpt kept in a JSON error.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Endpoint URL (defaults to the public service)
    pub base_url: String,
    /// Response language
    pub language: String,
    /// Request timeout in seconds; `None` leaves the transport default
    pub timeout_secs: Option<u64>,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the response language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Directions API client.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
    api_key: String,
    language: String,
}

impl DirectionsClient {
    /// Create a new directions client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        let base_url = reqwest::Url::parse(&config.base_url).map_err(|e| {
            DirectionsError::InvalidConfig(format!("base URL {:?}: {e}", config.base_url))
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            language: config.language,
        })
    }

    /// Fetch route alternatives between two free-text places.
    ///
    /// Returns an empty list if either place is blank or the request fails
    /// in any way. Nothing is retried.
    pub async fn fetch(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Vec<RouteOption> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            debug!("Blank origin or destination, skipping directions request");
            return Vec::new();
        }

        match self.try_fetch(origin, destination, mode).await {
            Ok(routes) => routes,
            Err(e) => {
                warn!(
                    origin = %origin,
                    destination = %destination,
                    mode = %mode,
                    error = %e,
                    "Directions request failed"
                );
                Vec::new()
            }
        }
    }

    /// Fetch route alternatives, reporting why a request failed.
    pub async fn try_fetch(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<Vec<RouteOption>, DirectionsError> {
        debug!(origin = %origin, destination = %destination, mode = %mode, "Requesting directions");

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", mode.as_query()),
                ("alternatives", "true"),
                ("language", self.language.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let document: Value = serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
        })?;

        match document.get("status").and_then(Value::as_str) {
            None | Some("OK") => {}
            Some("ZERO_RESULTS") | Some("NOT_FOUND") => {
                debug!(origin = %origin, destination = %destination, "No routes found");
                return Ok(Vec::new());
            }
            Some(other) => {
                let message = document
                    .get("error_message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                return Err(DirectionsError::Service {
                    status: other.to_string(),
                    message,
                });
            }
        }

        let routes = parse_directions(&document);
        debug!(routes = routes.len(), "Parsed directions");
        Ok(routes)
    }
}
