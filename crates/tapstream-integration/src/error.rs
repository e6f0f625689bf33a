//! Error types for integration operations.

use tapstream_types::TypesError;
use thiserror::Error;

/// Errors reported by the attribution SDK.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Account name or secret rejected.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Session could not be established.
    #[error("Session error: {0}")]
    Session(String),
}

impl SdkError {
    /// Create an invalid credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials(message.into())
    }

    /// Create a session error.
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }
}

/// Errors that can occur while constructing or driving an integration.
#[derive(Error, Debug)]
pub enum IntegrationError {
    /// The SDK failed; propagated untouched, never retried.
    #[error("SDK error: {0}")]
    Sdk(#[from] SdkError),

    /// Host payload or settings could not be read.
    #[error(transparent)]
    Types(#[from] TypesError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_display() {
        let err = SdkError::invalid_credentials("empty account name");
        assert_eq!(err.to_string(), "Invalid credentials: empty account name");
    }

    #[test]
    fn test_sdk_error_wrapped() {
        let err: IntegrationError = SdkError::session("network down").into();
        assert!(err.to_string().contains("SDK error"));
        assert!(err.to_string().contains("network down"));
    }

    #[test]
    fn test_types_error_transparent() {
        let err: IntegrationError = TypesError::invalid_input("bad payload").into();
        assert_eq!(err.to_string(), "Invalid input: bad payload");
    }
}
