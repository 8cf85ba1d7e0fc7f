//! Transport error definitions.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to a backend service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The service answered with a status outside the 2xx range.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The request could not complete (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The body was not the expected JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL or path could not be turned into a request URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Whether the request failed because the deadline elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Network(e) if e.is_timeout())
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
