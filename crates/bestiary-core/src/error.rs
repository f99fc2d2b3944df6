//! Error types for the bestiary catalog.

use thiserror::Error;

/// Result type alias using the bestiary Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for catalog operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unique-constraint race that could not be resolved internally
    #[error("Conflict: {0}")]
    Conflict(String),

    /// External provider request failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Upstream(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("Creature 42".to_string());
        assert_eq!(err.to_string(), "Not found: Creature 42");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("name too short".to_string());
        assert_eq!(err.to_string(), "Invalid input: name too short");
    }

    #[test]
    fn test_error_display_conflict() {
        let err = Error::Conflict("category grass".to_string());
        assert_eq!(err.to_string(), "Conflict: category grass");
    }

    #[test]
    fn test_error_display_upstream() {
        let err = Error::Upstream("provider returned 503".to_string());
        assert_eq!(err.to_string(), "Upstream error: provider returned 503");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing base url".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing base url");
    }

    #[test]
    fn test_error_display_internal() {
        let err = Error::Internal("unexpected state".to_string());
        assert_eq!(err.to_string(), "Internal error: unexpected state");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::NotFound("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("NotFound"));
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }
}
