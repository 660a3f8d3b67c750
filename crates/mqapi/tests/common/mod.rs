//! Common test utilities and helpers

use mqapi::{ApiClient, Headers};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wiremock::{Request, Respond, ResponseTemplate};

/// Order payload used across tests
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub name: String,
}

/// Payload with multi-word fields and no serde renames
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub loyalty_points: u32,
}

/// Responds `200 OK` with the request body it received
#[allow(dead_code)]
pub struct EchoBody;

impl Respond for EchoBody {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_bytes(request.body.clone())
    }
}

/// Build a client pointed at a mock server
#[allow(dead_code)]
pub fn client_for(uri: &str) -> ApiClient {
    ApiClient::new(uri, None).expect("Failed to build client")
}

/// Build a client with a short timeout
#[allow(dead_code)]
pub fn client_with_timeout(uri: &str, timeout: Duration) -> ApiClient {
    ApiClient::new(uri, Some(timeout)).expect("Failed to build client")
}

/// Headers from name/value pairs
#[allow(dead_code)]
pub fn headers(pairs: &[(&str, &str)]) -> Headers {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Address of a local port nothing is listening on
#[allow(dead_code)]
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}", addr)
}
