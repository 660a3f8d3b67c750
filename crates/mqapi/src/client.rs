//! The request executor

use std::sync::Arc;
use std::time::Duration;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderValue, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    ApiResult, MEDIA_TYPE_JSON,
    config::{ClientConfig, KeyCase, normalize_base_url},
    error::{Error, Result},
    http::{Headers, apply_headers, decode_body, encode_body},
    observability::{
        CallKind, RequestMetadata, RequestTimer, ResponseMetadata, log_captured_failure,
    },
    query::{QueryString, build_query_string},
};

/// JSON API client bound to one base URL.
///
/// Holds a single `reqwest::Client` built at construction with the configured
/// timeout, user agent, `Accept: application/json` and gzip/deflate response
/// decompression. Clones share that handle, so one client can serve many
/// concurrent requests. Dropping the last clone releases it.
///
/// Request methods never fail: transport and serialization errors come back
/// as an [`ApiResult`] with status `500` and the error message as content.
///
/// # Example
///
/// ```rust,no_run
/// use mqapi::{ApiClient, Headers};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct NewOrder { sku: String, quantity: u32 }
///
/// #[derive(Deserialize)]
/// struct Order { id: u64 }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("https://shop.example.com/api", None)?;
///
/// let created = client
///     .post::<_, Order>("orders", &NewOrder { sku: "A-1".into(), quantity: 2 }, &Headers::new())
///     .await;
///
/// if let Some(order) = created.result() {
///     println!("created order {}", order.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    /// Transport handle shared by every request
    http_client: reqwest::Client,
    /// Base URL, always ending with `/`
    base_url: Url,
    /// Timeout applied to every request
    timeout: Duration,
    /// Key naming for outgoing bodies
    key_case: KeyCase,
}

impl ApiClient {
    /// Create a client for `base_url` with an optional timeout
    /// (default 90 seconds).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty, unparseable or not
    /// `http`/`https`, or if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Self::builder().base_url(base_url);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or invalid, or if the
    /// HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let ClientConfig {
            base_url,
            timeout,
            user_agent,
            mut default_headers,
            key_case,
        } = config;

        let base_url_string = base_url.unwrap_or_default();
        if base_url_string.trim().is_empty() {
            return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
        }

        let base_url: Url = normalize_base_url(base_url_string.trim())
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidUrl(format!(
                    "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                    scheme
                )));
            }
        }

        default_headers
            .entry(ACCEPT)
            .or_insert(HeaderValue::from_static(MEDIA_TYPE_JSON));

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(default_headers)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                timeout,
                key_case,
            }),
        })
    }

    /// Base URL requests are resolved against (always ends with `/`).
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Timeout applied to every request.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Send a GET request and deserialize a `200 OK` body into `T`.
    ///
    /// With the default [`KeyCase::CamelCase`], camelCase keys in the body
    /// also match snake_case fields of `T`.
    #[tracing::instrument(skip(self, headers), fields(method = "GET"))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str, headers: &Headers) -> ApiResult<T> {
        self.execute(Method::GET, path, None::<&()>, headers, CallKind::Typed)
            .await
    }

    /// Send a GET request and keep only the raw body text.
    #[tracing::instrument(skip(self, headers), fields(method = "GET"))]
    pub async fn get_raw(&self, path: &str, headers: &Headers) -> ApiResult {
        self.execute(Method::GET, path, None::<&()>, headers, CallKind::Raw)
            .await
    }

    /// Send `body` as JSON in a POST request and deserialize a `200 OK`
    /// body into `T`.
    ///
    /// A response that echoes the posted body decodes back into the type
    /// that was sent, whichever [`KeyCase`] the client uses.
    #[tracing::instrument(skip(self, body, headers), fields(method = "POST"))]
    pub async fn post<B, T>(&self, path: &str, body: &B, headers: &Headers) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, path, Some(body), headers, CallKind::Typed)
            .await
    }

    /// Send `body` as JSON in a POST request and keep only the raw body text.
    #[tracing::instrument(skip(self, body, headers), fields(method = "POST"))]
    pub async fn post_raw<B>(&self, path: &str, body: &B, headers: &Headers) -> ApiResult
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, Some(body), headers, CallKind::Raw)
            .await
    }

    /// Build `path?name=value&...` from the declared fields of `query`.
    ///
    /// See [`build_query_string`].
    pub fn create_query_string<Q: QueryString + ?Sized>(&self, query: &Q, path: &str) -> String {
        build_query_string(path, query)
    }

    /// Resolve a request path against the base URL.
    fn url(&self, path: &str) -> Result<Url> {
        self.inner.base_url.join(path).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                path, e
            ))
        })
    }

    /// Run one request, turning any error into a `500` envelope.
    async fn execute<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: &Headers,
        kind: CallKind,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let timer = RequestTimer::start();
        let mut request =
            RequestMetadata::new(method.as_str(), path, kind, self.inner.key_case);

        match self.send(&mut request, method, path, body, headers).await {
            Ok(result) => {
                ResponseMetadata::of(&request, &result, timer.elapsed()).log(&request);
                result
            }
            Err(err) => {
                let failure = ApiResult::failure(err.to_string());
                log_captured_failure(&request, err.kind(), failure.content(), timer.elapsed());
                failure
            }
        }
    }

    async fn send<B, T>(
        &self,
        request: &mut RequestMetadata,
        method: Method,
        path: &str,
        body: Option<&B>,
        headers: &Headers,
    ) -> Result<ApiResult<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        let mut builder = apply_headers(self.inner.http_client.request(method, url), headers)?;

        if let Some(body) = body {
            let body = encode_body(body, self.inner.key_case)?;
            request.body_size = Some(body.len());
            builder = builder.header(CONTENT_TYPE, MEDIA_TYPE_JSON).body(body);
        }
        request.log_request();

        let response = builder
            .send()
            .await
            .map_err(|e| Error::from_transport(e, self.inner.timeout))?;

        let status = response.status();
        let content = response
            .text()
            .await
            .map_err(|e| Error::from_transport(e, self.inner.timeout))?;

        let result = ApiResult::new(status, content);
        if !(request.kind.decodes() && result.is_success()) || result.content().is_empty() {
            return Ok(result);
        }

        let payload = decode_body::<T>(result.content(), self.inner.key_case)?;
        Ok(result.with_result(Some(payload)))
    }
}

/// Builder for creating a configured [`ApiClient`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout for requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the key naming for outgoing JSON bodies.
    pub fn key_case(mut self, key_case: KeyCase) -> Self {
        self.config.key_case = key_case;
        self
    }

    /// Add a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        self.config = self.config.default_header(key, value)?;
        Ok(self)
    }

    /// Build the client with the configured options.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::from_config`].
    pub fn build(self) -> Result<ApiClient> {
        ApiClient::from_config(self.config)
    }
}

impl From<ClientConfig> for ClientBuilder {
    fn from(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new_normalizes_base_url() {
        let client = ApiClient::new("http://api.test", None).unwrap();
        assert_eq!(client.base_url(), "http://api.test/");
        assert_eq!(client.timeout(), Duration::from_secs(90));
    }

    #[test]
    fn test_client_new_keeps_base_path() {
        let client = ApiClient::new("http://api.test/v1", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(client.base_url(), "http://api.test/v1/");
        assert_eq!(client.timeout(), Duration::from_secs(5));
        assert_eq!(
            client.url("orders").unwrap().as_str(),
            "http://api.test/v1/orders"
        );
    }

    #[test]
    fn test_client_builder() {
        let client = ApiClient::builder()
            .base_url("https://example.com")
            .timeout(Duration::from_secs(30))
            .user_agent("custom-agent")
            .key_case(KeyCase::AsIs)
            .default_header("X-Tenant", "acme")
            .unwrap()
            .build();

        assert!(client.is_ok());
        assert_eq!(client.unwrap().inner.key_case, KeyCase::AsIs);
    }

    #[test]
    fn test_client_from_config_empty_url() {
        let result = ApiClient::from_config(ClientConfig::with_base_url("   "));
        match result {
            Err(Error::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error for empty URL"),
        }
    }

    #[test]
    fn test_client_from_config_missing_url() {
        let result = ApiClient::from_config(ClientConfig::default());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_client_from_config_invalid_scheme() {
        let result = ApiClient::new("ftp://invalid.example.com", None);
        match result {
            Err(Error::InvalidUrl(msg)) => {
                assert!(msg.contains("ftp"));
                assert!(msg.contains("http"));
            }
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_client_from_config_unparseable_url() {
        let result = ApiClient::new("not a url", None);
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_client_clone_shares_handle() {
        let client1 = ApiClient::new("http://api.test", None).unwrap();
        let client2 = client1.clone();
        assert!(Arc::ptr_eq(&client1.inner, &client2.inner));
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiClient>();
    }

    #[test]
    fn test_create_query_string() {
        struct Page {
            number: u32,
        }

        crate::query_string! {
            Page { number => "page" }
        }

        let client = ApiClient::new("http://api.test", None).unwrap();
        assert_eq!(
            client.create_query_string(&Page { number: 3 }, "items"),
            "items?page=3"
        );
    }

    #[test]
    fn test_invalid_path_is_captured() {
        let client = ApiClient::new("http://api.test", None).unwrap();
        let result: ApiResult<serde_json::Value> =
            tokio_test::block_on(client.get("http://[::1", &Headers::new()));
        assert_eq!(result.status_code(), 500);
        assert!(result.content().starts_with("Invalid URL"));
        assert!(result.result().is_none());
    }
}
