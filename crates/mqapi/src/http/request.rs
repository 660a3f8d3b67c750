//! Request assembly and response decoding

use std::collections::HashMap;

use mqapi_core::serde::{CamelCaseDecode, CamelCasePipeline};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{KeyCase, parse_header};
use crate::error::Result;

/// Extra headers for a single request, by name.
///
/// They apply to the request they are passed with only; nothing is kept on
/// the client between calls.
pub type Headers = HashMap<String, String>;

/// Add per-request headers to a `reqwest` request builder.
///
/// # Errors
///
/// Returns an error if a header name or value is invalid.
pub fn apply_headers(
    mut builder: reqwest::RequestBuilder,
    headers: &Headers,
) -> Result<reqwest::RequestBuilder> {
    for (key, value) in headers {
        let (name, value) = parse_header(key.clone(), value.clone())?;
        builder = builder.header(name, value);
    }
    Ok(builder)
}

/// Serialize a request body to JSON bytes.
///
/// A body that serializes to JSON `null` (`None`, `()`) becomes an empty
/// entity.
///
/// # Errors
///
/// Returns an error if the body cannot be serialized.
pub fn encode_body<B: Serialize + ?Sized>(body: &B, key_case: KeyCase) -> Result<Vec<u8>> {
    let value = match key_case {
        KeyCase::CamelCase => body.to_camel_case_value()?,
        KeyCase::AsIs => serde_json::to_value(body)?,
    };

    if value.is_null() {
        return Ok(Vec::new());
    }

    Ok(serde_json::to_vec(&value)?)
}

/// Deserialize a response body.
///
/// With [`KeyCase::CamelCase`] the body is expected to use the same naming
/// the client writes, so camelCase keys also match snake_case fields. With
/// [`KeyCase::AsIs`] the type's own field names must match exactly.
///
/// # Errors
///
/// Returns an error if the body does not deserialize into `T`.
pub fn decode_body<T: DeserializeOwned>(content: &str, key_case: KeyCase) -> Result<T> {
    let payload = match key_case {
        KeyCase::CamelCase => T::from_camel_case_str(content)?,
        KeyCase::AsIs => serde_json::from_str(content)?,
    };
    Ok(payload)
}
