//! The uniform result envelope returned by every request.

use crate::error::ApiError;
use http::StatusCode;

/// Outcome of a single request: status code, raw body text and, when
/// requested and the status is `200 OK`, the deserialized payload.
///
/// Transport and serialization failures are captured here too, with status
/// `500` and the failure message as `content`, so every request method of
/// [`ApiClient`](crate::ApiClient) returns an `ApiResult` rather than a
/// `Result`.
///
/// The untyped request methods return `ApiResult` with the default payload
/// type and never fill `result`.
///
/// # Example
///
/// ```rust,no_run
/// # use mqapi::{ApiClient, Headers};
/// # #[derive(serde::Deserialize)] struct Order { id: u32 }
/// # async fn example(client: ApiClient) {
/// let result = client.get::<Order>("orders/1", &Headers::new()).await;
///
/// if result.is_success() {
///     println!("order {}", result.result().map(|o| o.id).unwrap_or_default());
/// } else {
///     eprintln!("{}: {}", result.status(), result.content());
/// }
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T = serde_json::Value> {
    status: StatusCode,
    content: String,
    result: Option<T>,
}

impl<T> ApiResult<T> {
    pub(crate) fn new(status: StatusCode, content: impl Into<String>) -> Self {
        Self {
            status,
            content: content.into(),
            result: None,
        }
    }

    /// Envelope for a failure captured before a response was available.
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub(crate) fn with_result(mut self, result: Option<T>) -> Self {
        self.result = result;
        self
    }

    /// Whether the status is exactly `200 OK`.
    ///
    /// Other 2xx codes count as non-success.
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// HTTP status of the response (or `500` for a captured failure).
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// HTTP status as a plain number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Raw response text, or the failure message for a captured failure.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Deserialized payload, if any.
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Consume the envelope and return the payload.
    pub fn into_inner(self) -> Option<T> {
        self.result
    }

    /// Consume the envelope and return all three parts.
    pub fn into_parts(self) -> (StatusCode, String, Option<T>) {
        (self.status, self.content, self.result)
    }

    /// Return an [`ApiError`] if the status is not `200 OK`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` carrying the status and content when
    /// [`is_success`](Self::is_success) is false.
    pub fn error_for_status(&self) -> Result<&Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::new(self.status, self.content.clone()))
        }
    }

    /// Convert into a `Result`, turning a non-success status into [`ApiError`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError` carrying the status and content when
    /// [`is_success`](Self::is_success) is false.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.result)
        } else {
            Err(ApiError::new(self.status, self.content))
        }
    }

    /// Map the payload, keeping status and content.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            status: self.status,
            content: self.content,
            result: self.result.map(f),
        }
    }
}

impl<T> From<ApiResult<T>> for ApiError {
    fn from(result: ApiResult<T>) -> Self {
        ApiError::new(result.status, result.content)
    }
}
