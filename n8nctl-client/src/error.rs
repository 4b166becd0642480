//! Error types for the n8n client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to an n8n instance
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived (network, DNS, timeout)
    #[error("could not reach n8n instance: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned a non-2xx status code
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body from the API, verbatim
        message: String,
    },

    /// Failed to parse a response body
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Client configuration is incomplete or invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Create an API error from status code and response body
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::Api { status: 404, .. })
    }
}
