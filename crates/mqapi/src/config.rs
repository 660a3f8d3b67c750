//! Configuration for the mqapi client

use http::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

use crate::error::{Error, Result};

/// How object keys of JSON bodies are named on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyCase {
    /// Rewrite every object key to camelCase before sending, and accept
    /// camelCase keys for snake_case fields when decoding.
    #[default]
    CamelCase,
    /// Send and read keys exactly as the type (de)serializes them.
    AsIs,
}

/// Configuration for [`ApiClient`](crate::ApiClient).
///
/// Fixed at construction; the client builds its single transport handle from
/// it and never changes it afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against
    pub base_url: Option<String>,

    /// Timeout applied to every request
    pub timeout: Duration,

    /// Value of the `User-Agent` header
    pub user_agent: String,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,

    /// Key naming applied to outgoing JSON bodies
    pub key_case: KeyCase,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: crate::DEFAULT_TIMEOUT,
            user_agent: crate::DEFAULT_USER_AGENT.to_string(),
            default_headers: HeaderMap::new(),
            key_case: KeyCase::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration for a base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory (or a parent) is read first,
    /// if there is one; variables already set in the process win.
    /// This will look for:
    /// - `MQAPI_BASE_URL` for the API base URL
    /// - `MQAPI_TIMEOUT` for request timeout (in seconds)
    /// - `MQAPI_USER_AGENT` for the `User-Agent` header
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a `.env` file exists but cannot
    /// be read or parsed, or if `MQAPI_TIMEOUT` is set but is not a whole
    /// number of seconds.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(dotenv_error(e)),
        }
        Self::from_process_env()
    }

    /// Load configuration from the given `.env` file, then from environment
    /// variables as in [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the file is missing, unreadable or
    /// malformed, or if `MQAPI_TIMEOUT` is invalid.
    #[cfg(feature = "env")]
    pub fn from_env_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        dotenvy::from_path(path.as_ref()).map_err(dotenv_error)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded .env file");
        Self::from_process_env()
    }

    #[cfg(feature = "env")]
    fn from_process_env() -> Result<Self> {
        use std::env;

        let mut config = Self::default();

        if let Ok(base_url) = env::var("MQAPI_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("MQAPI_TIMEOUT") {
            let timeout_secs = timeout_str.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfig(format!(
                    "MQAPI_TIMEOUT must be a number of seconds, got '{}'",
                    timeout_str
                ))
            })?;
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(user_agent) = env::var("MQAPI_USER_AGENT")
            && !user_agent.trim().is_empty()
        {
            config.user_agent = user_agent;
        }

        Ok(config)
    }

    /// Add a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let (key, value) = parse_header(key.into(), value.into())?;
        self.default_headers.insert(key, value);
        Ok(self)
    }
}

#[cfg(feature = "env")]
fn dotenv_error(err: dotenvy::Error) -> Error {
    Error::InvalidConfig(format!("failed to load .env file: {}", err))
}

/// Parse a header name/value pair.
pub(crate) fn parse_header(key: String, value: String) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| Error::InvalidHeaderName(key))?;
    let value = HeaderValue::from_str(&value).map_err(|_| Error::InvalidHeaderValue(value))?;
    Ok((name, value))
}

/// Append `/` to a base URL that does not already end with one.
///
/// Relative request paths resolve under the full base path only when it ends
/// with a separator: `http://host/v1` + `orders` would otherwise become
/// `http://host/orders`.
///
/// ```
/// use mqapi::config::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://api.test"), "http://api.test/");
/// assert_eq!(normalize_base_url("http://api.test/v1/"), "http://api.test/v1/");
/// ```
pub fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
