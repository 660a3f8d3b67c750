//! # mqapi
//!
//! Thin async JSON API client:
//! - GET/POST with JSON bodies (camelCase keys by default, read back into
//!   either snake_case or camelCase field names)
//! - A uniform [`ApiResult`] envelope carrying status, raw content and the
//!   deserialized payload, returned by every call instead of an error
//! - Query strings built from explicitly declared struct fields
//!
//! Descriptions and display names for enum variants live in the companion
//! `mqapi-core` crate and are re-exported here.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mqapi::{ApiClient, Headers};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Order {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("https://shop.example.com/api", None)?;
//!
//!     let order = client.get::<Order>("orders/1", &Headers::new()).await;
//!     match order.into_result()? {
//!         Some(order) => println!("{:?}", order),
//!         None => println!("empty body"),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::time::Duration;

// Re-export commonly used types
pub use client::{ApiClient, ClientBuilder};
pub use config::{ClientConfig, KeyCase};
pub use error::{ApiError, Error, Result};
pub use crate::http::Headers;
pub use query::{QueryString, QueryValue, build_query_string};
pub use result::ApiResult;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod query;
pub mod result;

// Re-export the core helpers for convenience
pub use mqapi_core::describe::Describe;
pub use mqapi_core::describe_enum;
pub use mqapi_core::serde::{CamelCaseDecode, CamelCasePipeline};

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use mqapi::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ApiClient, ApiError, ApiResult, ClientConfig, Describe, Error, Headers, KeyCase,
        QueryString, Result, describe_enum, query_string,
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `User-Agent` header value
pub const DEFAULT_USER_AGENT: &str = "MqApi-v1";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Media type used for `Accept` and `Content-Type`
pub const MEDIA_TYPE_JSON: &str = "application/json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_USER_AGENT, "MqApi-v1");
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(90));
        assert_eq!(MEDIA_TYPE_JSON, "application/json");
    }
}
