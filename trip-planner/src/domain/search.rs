//! Origin/destination pairs remembered as recent searches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A free-text origin and destination, compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchPair {
    pub origin: String,
    pub destination: String,
}

impl SearchPair {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }

    /// The same pair travelled the other way.
    pub fn swapped(&self) -> Self {
        Self::new(self.destination.clone(), self.origin.clone())
    }

    /// Identity key used for deduplication.
    pub fn key(&self) -> (String, String) {
        (self.origin.clone(), self.destination.clone())
    }
}

impl fmt::Display for SearchPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.origin, self.destination)
    }
}
