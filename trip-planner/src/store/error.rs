//! Persistence error types.

use std::path::PathBuf;

/// Errors from reading or writing persisted collections.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored data could not be decoded
    #[error("corrupt data in {location}: {message}")]
    Corrupt { location: String, message: String },

    /// A value could not be serialized
    #[error("cannot encode value: {0}")]
    Encode(String),

    /// Namespace is empty or not usable as a file name
    #[error("invalid namespace {0:?}")]
    InvalidNamespace(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Corrupt {
            location: "BusAppPrefs/favoriteBusStops".into(),
            message: "expected array".into(),
        };
        assert_eq!(
            err.to_string(),
            "corrupt data in BusAppPrefs/favoriteBusStops: expected array"
        );

        let err = StoreError::InvalidNamespace("../etc".into());
        assert_eq!(err.to_string(), r#"invalid namespace "../etc""#);

        let err = StoreError::Io {
            path: PathBuf::from("/data/prefs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("I/O error on /data/prefs.json"));
    }
}
