//! Error types for docstruct library.

use thiserror::Error;

/// Result type alias for docstruct operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing a document.
///
/// The structural passes themselves never fail: degraded input is
/// reported through fields of the output records instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The configured chunk size is not a positive number of characters.
    #[error("Invalid chunk size: {0} (must be greater than 0)")]
    InvalidChunkSize(usize),

    /// The engine payload could not be normalized into a document.
    #[error("Normalization error: {0}")]
    Normalize(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error while serializing an output record.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidChunkSize(0);
        assert_eq!(
            err.to_string(),
            "Invalid chunk size: 0 (must be greater than 0)"
        );

        let err = Error::Normalize("expected an object".to_string());
        assert_eq!(err.to_string(), "Normalization error: expected an object");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
