//! Error types for the mqapi client
//!
//! Request operations never return these: a failed call is captured into an
//! [`ApiResult`](crate::ApiResult) with status 500. `Error` surfaces from the
//! fallible constructors and is the internal currency of a single request
//! before it is captured. [`ApiError`] is the typed failure callers can raise
//! from a non-success envelope.

use http::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for fallible mqapi operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the mqapi client.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Any other failure while sending the request or reading the body.
    #[error("Request failed: {0}")]
    Request(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Short name of the failure class, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidUrl(_) => "invalid_url",
            Error::HttpClient(_) => "http_client",
            Error::InvalidConfig(_) => "invalid_config",
            Error::InvalidHeaderName(_) | Error::InvalidHeaderValue(_) => "invalid_header",
            Error::Connection(_) => "connection",
            Error::Timeout(_) => "timeout",
            Error::Request(_) => "request",
            Error::Serialization(_) => "serialization",
        }
    }

    /// Classify a transport error from `reqwest`.
    ///
    /// `timeout` is the configured client timeout, reported back in
    /// [`Error::Timeout`].
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Error::Timeout(timeout)
        } else if err.is_connect() {
            Error::Connection(err.to_string())
        } else if err.is_decode() {
            Error::Request(format!("failed to decode response body: {}", err))
        } else {
            Error::Request(err.to_string())
        }
    }
}

/// A typed API failure carrying the HTTP status code and the raw body.
///
/// The client never produces this on its own; it is the value callers reach
/// for when they want to turn a non-success envelope into an error, usually
/// through [`ApiResult::error_for_status`](crate::ApiResult::error_for_status)
/// or [`ApiResult::into_result`](crate::ApiResult::into_result).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API request failed with status {status}: {content}")]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub content: String,
}

impl ApiError {
    /// Create an API error from a status code and body text.
    pub fn new(status: StatusCode, content: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            content: content.into(),
        }
    }

    /// The status code as an [`http::StatusCode`], if it is a valid one.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }
}
