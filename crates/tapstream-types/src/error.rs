//! Error types for host-side payloads and settings.

use thiserror::Error;

/// Errors raised while reading settings or decoding host payloads.
#[derive(Debug, Error)]
pub enum TypesError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl TypesError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<config::ConfigError> for TypesError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TypesError::config("missing accountName");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing accountName"));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = TypesError::invalid_input("payload is not an object");
        assert_eq!(err.to_string(), "Invalid input: payload is not an object");
    }

    #[test]
    fn test_serialization_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: TypesError = json_err.into();
        assert!(err.to_string().contains("Serialization error"));
    }
}
