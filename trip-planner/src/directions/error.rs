//! Directions error types.

use crate::polyline::PolylineError;

/// Errors from the directions HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Body was not valid JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The service answered with a non-OK status field
    #[error("directions service returned {status}: {message}")]
    Service { status: String, message: String },

    /// Client configuration is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Why a single route was dropped from a directions response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A required field is absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The route has an empty leg list
    #[error("route has no legs")]
    NoLegs,

    /// The overview geometry does not decode
    #[error("invalid overview geometry: {0}")]
    Geometry(#[from] PolylineError),

    /// The JSON does not match the expected shape
    #[error("unexpected structure: {0}")]
    Schema(String),
}
