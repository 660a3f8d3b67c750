//! HTTP request helpers
//!
//! Per-request header application, JSON body encoding and response body
//! decoding. All of them run inside a single request and fail with
//! [`crate::Error`], which the client captures into the envelope.

pub use request::{Headers, apply_headers, decode_body, encode_body};

mod request;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
