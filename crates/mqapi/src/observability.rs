//! Structured logging for requests.
//!
//! Every call made through [`ApiClient`](crate::ApiClient) is logged here:
//! `debug` when it is sent, `info` when it comes back `200 OK`, `warn` for
//! any other status or a failure captured into a `500` envelope. Each event
//! records whether the call was typed or raw and what became of the payload.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::ApiResult;
use crate::config::KeyCase;

/// Whether a call asked for its body to be deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `get` / `post`: a `200 OK` body is decoded into the result type
    Typed,
    /// `get_raw` / `post_raw`: only the body text is kept
    Raw,
}

impl CallKind {
    /// `true` for [`CallKind::Typed`].
    pub fn decodes(self) -> bool {
        matches!(self, CallKind::Typed)
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CallKind::Typed => "typed",
            CallKind::Raw => "raw",
        })
    }
}

/// What happened to the response payload of a completed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOutcome {
    /// Raw call, no decoding asked for
    NotRequested,
    /// Status other than `200 OK`, body left as text
    NotSuccess,
    /// `200 OK` with an empty body, result left unset
    EmptyBody,
    /// Body decoded into the result type
    Decoded,
}

impl PayloadOutcome {
    /// Classify a completed call.
    pub fn of<T>(kind: CallKind, result: &ApiResult<T>) -> Self {
        if !kind.decodes() {
            PayloadOutcome::NotRequested
        } else if !result.is_success() {
            PayloadOutcome::NotSuccess
        } else if result.result().is_none() {
            PayloadOutcome::EmptyBody
        } else {
            PayloadOutcome::Decoded
        }
    }
}

impl fmt::Display for PayloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PayloadOutcome::NotRequested => "not_requested",
            PayloadOutcome::NotSuccess => "not_success",
            PayloadOutcome::EmptyBody => "empty_body",
            PayloadOutcome::Decoded => "decoded",
        })
    }
}

/// One outgoing call, as seen by the logs
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method
    pub method: String,
    /// Request path, relative to the base URL
    pub path: String,
    /// Typed or raw call
    pub kind: CallKind,
    /// Key naming used for the body
    pub key_case: KeyCase,
    /// Encoded body size in bytes, once the body has been encoded
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Describe a call before anything has been sent.
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        kind: CallKind,
        key_case: KeyCase,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            kind,
            key_case,
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log the call being sent.
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            path = %self.path,
            call = %self.kind,
            key_case = ?self.key_case,
            body_size = self.body_size,
            "Sending API request"
        );
    }
}

/// The answer to one call, as seen by the logs
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// Status stored in the envelope
    pub status: u16,
    /// Body size in bytes
    pub body_size: usize,
    /// What became of the payload
    pub payload: PayloadOutcome,
    /// Time elapsed for the call
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Summarize a completed call.
    pub fn of<T>(request: &RequestMetadata, result: &ApiResult<T>, elapsed: Duration) -> Self {
        Self {
            status: result.status_code(),
            body_size: result.content().len(),
            payload: PayloadOutcome::of(request.kind, result),
            elapsed,
        }
    }

    /// Log the completed call at a level matching its status.
    pub fn log(&self, request: &RequestMetadata) {
        if self.status == 200 {
            info!(
                method = %request.method,
                path = %request.path,
                call = %request.kind,
                status = self.status,
                payload = %self.payload,
                body_size = self.body_size,
                elapsed_ms = self.elapsed.as_millis(),
                "API request succeeded"
            );
        } else {
            warn!(
                method = %request.method,
                path = %request.path,
                call = %request.kind,
                status = self.status,
                payload = %self.payload,
                body_size = self.body_size,
                elapsed_ms = self.elapsed.as_millis(),
                "API request returned non-success status"
            );
        }
    }
}

/// Log a failure that was captured into a `500` envelope.
pub fn log_captured_failure(
    request: &RequestMetadata,
    error_kind: &str,
    message: &str,
    elapsed: Duration,
) {
    warn!(
        method = %request.method,
        path = %request.path,
        call = %request.kind,
        error_kind,
        error = %message,
        elapsed_ms = elapsed.as_millis(),
        "API request failed, returning status 500"
    );
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `mqapi=info` when `RUST_LOG` is unset. Returns `false` if a
/// global subscriber was already installed.
#[cfg(feature = "trace")]
pub fn init_tracing() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mqapi=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn typed_get() -> RequestMetadata {
        RequestMetadata::new("GET", "orders/1", CallKind::Typed, KeyCase::CamelCase)
    }

    #[test]
    fn test_request_metadata_creation() {
        let metadata = RequestMetadata::new("POST", "orders", CallKind::Raw, KeyCase::AsIs)
            .with_body_size(1024);
        assert_eq!(metadata.method, "POST");
        assert_eq!(metadata.kind, CallKind::Raw);
        assert_eq!(metadata.key_case, KeyCase::AsIs);
        assert_eq!(metadata.body_size, Some(1024));
    }

    #[test]
    fn test_payload_outcome() {
        let ok: ApiResult<u32> = ApiResult::new(StatusCode::OK, "7".to_string());
        assert_eq!(PayloadOutcome::of(CallKind::Raw, &ok), PayloadOutcome::NotRequested);
        assert_eq!(PayloadOutcome::of(CallKind::Typed, &ok), PayloadOutcome::EmptyBody);

        let decoded = ok.with_result(Some(7));
        assert_eq!(PayloadOutcome::of(CallKind::Typed, &decoded), PayloadOutcome::Decoded);

        let missing: ApiResult<u32> = ApiResult::new(StatusCode::NOT_FOUND, "gone".to_string());
        assert_eq!(PayloadOutcome::of(CallKind::Typed, &missing), PayloadOutcome::NotSuccess);
    }

    #[test]
    fn test_response_metadata_of_result() {
        let result: ApiResult<u32> =
            ApiResult::new(StatusCode::OK, "12".to_string()).with_result(Some(12));
        let response = ResponseMetadata::of(&typed_get(), &result, Duration::from_millis(4));
        assert_eq!(response.status, 200);
        assert_eq!(response.body_size, 2);
        assert_eq!(response.payload, PayloadOutcome::Decoded);
    }

    #[test]
    fn test_request_timer() {
        let timer = RequestTimer::start();
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed().as_millis() >= 10);
    }

    #[test]
    fn test_logging_does_not_panic_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let request = typed_get().with_body_size(0);
            request.log_request();

            let missing: ApiResult = ApiResult::new(StatusCode::NOT_FOUND, String::new());
            ResponseMetadata::of(&request, &missing, Duration::from_millis(3)).log(&request);

            let ok: ApiResult = ApiResult::new(StatusCode::OK, String::new());
            ResponseMetadata::of(&request, &ok, Duration::from_millis(1)).log(&request);

            log_captured_failure(&request, "timeout", "boom", Duration::from_millis(2));
        });
    }
}
