//! # Client Error Types
//!
//! Error type for every store operation and the API client.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Validation    │  │      Auth       │  │       NotFound          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Form rules     │  │  No token       │  │  GET /products/:id      │ │
//! │  │  (never reach   │  │  Invalid email  │  │  returned no record     │ │
//! │  │   the network)  │  │  HTTP 401/403   │  │  HTTP 404               │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Network      │  │     Server      │  │        Config           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Connect error  │  │  Non-2xx with   │  │  Bad base URL           │ │
//! │  │  Timeout        │  │  server message │  │  Unreadable config file │ │
//! │  │  Bad body       │  │  or fallback    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` output of every variant is the human-readable string that
//! stores put into their `error` field.

use catalog_core::{FormErrors, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Every way a catalog operation can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Client-side field checks failed; no request was sent.
    #[error("{0}")]
    Validation(#[from] FormErrors),

    /// Invalid or unreadable configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    // =========================================================================
    // Remote Errors
    // =========================================================================
    /// Missing token, rejected credentials, or an HTTP 401/403.
    #[error("{0}")]
    Auth(String),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request never produced a usable response.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err.into())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(format!("invalid API URL: {}", err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Missing/invalid token or credentials. Callers typically log out.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    /// Failed before touching the network.
    pub fn is_local(&self) -> bool {
        matches!(self, ClientError::Validation(_) | ClientError::Config(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// Stable machine-readable code for front ends.
    pub fn category(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
            ClientError::Auth(_) => "AUTH_ERROR",
            ClientError::NotFound(_) => "NOT_FOUND",
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Server { .. } => "SERVER_ERROR",
        }
    }

    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Field;

    #[test]
    fn test_display_is_the_bare_message() {
        assert_eq!(ClientError::Auth("No auth token".into()).to_string(), "No auth token");
        let err = ClientError::Server {
            status: 500,
            message: "Failed to create product".into(),
        };
        assert_eq!(err.to_string(), "Failed to create product");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_validation_conversion() {
        let err: ClientError = ValidationError::MustBePositive {
            field: Field::Price,
        }
        .into();
        assert!(err.is_local());
        assert_eq!(err.to_string(), "Price must be greater than 0");
    }

    #[test]
    fn test_categories() {
        assert!(ClientError::Auth("x".into()).is_auth_error());
        assert!(ClientError::NotFound("x".into()).is_not_found());
        assert!(!ClientError::Network("x".into()).is_local());
        assert!(ClientError::Config("x".into()).is_local());
        assert_eq!(ClientError::NotFound("x".into()).category(), "NOT_FOUND");
    }
}
