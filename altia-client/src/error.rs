//! Client error types

use thiserror::Error;

/// Error raised by the API client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 400: payload rejected by backend validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// 401: token missing or expired; the stored token has been cleared
    #[error("Authentication required")]
    Unauthorized,

    /// 403
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 409: business-rule rejection carrying the server's message
    #[error("{0}")]
    Conflict(String),

    /// Any other non-2xx response
    #[error("Server error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
