//! HTTP client error types.

use stockroom_model::ModelError;
use thiserror::Error;

/// Errors that can occur when talking to the inventory backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Failed to build or send the request.
    #[error("Request failed: {0}")]
    Request(String),

    /// Could not reach the backend.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx HTTP response.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The backend answered but its envelope reports a failure.
    #[error("Backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl FetchError {
    /// Whether the failure happened before the backend could answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Request(_) | FetchError::Connection(_) | FetchError::Timeout
        )
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

impl From<ModelError> for FetchError {
    fn from(e: ModelError) -> Self {
        FetchError::Parse(e.to_string())
    }
}
