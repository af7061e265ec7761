//! Error types for the Canopy client.
//!
//! One crate-wide error enum with conversions from the underlying transport,
//! store, and serialization errors. Recoverable hydration conditions (stale
//! cached schemas) are NOT errors; they travel through the diagnostics
//! channel in [`crate::hydrate`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Canopy client operations.
#[derive(Debug, Error)]
pub enum CanopyError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("API error ({status_code:?}): {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("{kind} not found: {id}")]
    ResourceNotFound { kind: String, id: String },

    // Cache store errors
    #[error("Cache store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Hydration errors
    #[error("Unsupported entity type: {kind}")]
    UnsupportedEntityType { kind: String },

    #[error("Invalid envelope: {message}")]
    InvalidEnvelope { message: String },

    #[error("Unknown content type: {id}")]
    UnknownContentType { id: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias for Canopy operations.
pub type Result<T> = std::result::Result<T, CanopyError>;

// Conversion implementations for common error types

impl From<std::io::Error> for CanopyError {
    fn from(err: std::io::Error) -> Self {
        CanopyError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for CanopyError {
    fn from(err: serde_json::Error) -> Self {
        CanopyError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for CanopyError {
    fn from(err: rusqlite::Error) -> Self {
        CanopyError::Store {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for CanopyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CanopyError::Timeout(crate::config::NetworkConfig::REQUEST_TIMEOUT)
        } else {
            CanopyError::Network {
                message: err.to_string(),
                source: Some(err),
            }
        }
    }
}

impl CanopyError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        CanopyError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a store error without an underlying database error.
    pub(crate) fn store(message: impl Into<String>) -> Self {
        CanopyError::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid-envelope error.
    pub(crate) fn envelope(message: impl Into<String>) -> Self {
        CanopyError::InvalidEnvelope {
            message: message.into(),
        }
    }

    /// Check if this error is a transient transport failure worth retrying.
    ///
    /// The client itself never retries; callers own that policy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CanopyError::Network { .. } | CanopyError::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CanopyError::UnknownContentType { id: "cat".into() };
        assert_eq!(err.to_string(), "Unknown content type: cat");

        let err = CanopyError::ResourceNotFound {
            kind: "Entry".into(),
            id: "nyancat".into(),
        };
        assert_eq!(err.to_string(), "Entry not found: nyancat");
    }

    #[test]
    fn test_retryable_errors() {
        assert!(CanopyError::Timeout(std::time::Duration::from_secs(5)).is_retryable());
        assert!(!CanopyError::UnsupportedEntityType {
            kind: "DeletedEntry".into()
        }
        .is_retryable());
        assert!(!CanopyError::store("disk full").is_retryable());
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CanopyError = parse_err.into();
        assert!(matches!(err, CanopyError::Json { .. }));
    }
}
