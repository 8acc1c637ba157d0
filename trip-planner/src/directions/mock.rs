//! Canned directions for testing without API access.
//!
//! Serves one stored response document for every query, as if it were the
//! live service's answer.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::{RouteOption, TravelMode};

use super::RouteProvider;
use super::error::DirectionsError;
use super::parse::parse_directions;

/// Route provider that answers every query from a fixed response.
#[derive(Debug, Clone)]
pub struct MockDirections {
    document: Arc<Value>,
}

impl MockDirections {
    /// Serve an already-decoded response document.
    pub fn new(document: Value) -> Self {
        Self {
            document: Arc::new(document),
        }
    }

    /// Serve a response given as JSON text.
    pub fn from_json(json: &str) -> Result<Self, DirectionsError> {
        let document = serde_json::from_str(json).map_err(|e| DirectionsError::Json {
            message: e.to_string(),
            body: None,
        })?;
        Ok(Self::new(document))
    }

    /// Serve a response stored in a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DirectionsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DirectionsError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }
}

impl RouteProvider for MockDirections {
    fn routes(
        &self,
        origin: &str,
        destination: &str,
        _mode: TravelMode,
    ) -> impl Future<Output = Vec<RouteOption>> + Send {
        let blank = origin.trim().is_empty() || destination.trim().is_empty();
        let document = Arc::clone(&self.document);
        async move {
            if blank {
                Vec::new()
            } else {
                parse_directions(&document)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RESPONSE: &str = r#"{
        "status": "OK",
        "routes": [
            {
                "overview_polyline": {"points": "??"},
                "legs": [{"duration": {"text": "5 mins"}, "steps": [
                    {"html_instructions": "Walk", "distance": {"text": "400 m"}, "travel_mode": "WALKING"}
                ]}]
            }
        ]
    }"#;

    #[tokio::test]
    async fn serves_stored_response() {
        let mock = MockDirections::from_json(RESPONSE).unwrap();
        let routes = mock.routes("A", "B", TravelMode::Walking).await;
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].total_duration, "5 mins");
    }

    #[tokio::test]
    async fn blank_place_is_empty() {
        let mock = MockDirections::from_json(RESPONSE).unwrap();
        assert!(mock.routes("", "B", TravelMode::Transit).await.is_empty());
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("directions.json");
        std::fs::write(&path, RESPONSE).unwrap();

        let mock = MockDirections::from_file(&path).unwrap();
        assert_eq!(mock.routes("A", "B", TravelMode::Transit).await.len(), 1);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            MockDirections::from_json("{"),
            Err(DirectionsError::Json { .. })
        ));
        assert!(MockDirections::from_file("/nonexistent/directions.json").is_err());
    }
}
