//! Error types for chat API operations

use thiserror::Error;

/// Chat API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level error (connection, timeout, TLS)
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        /// Endpoint path, e.g. `/messages`
        endpoint: &'static str,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        /// Endpoint path
        endpoint: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body preview
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("Invalid response from {endpoint}: {source}")]
    Decode {
        /// Endpoint path
        endpoint: &'static str,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading an attachment from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
