use ::serde::de::DeserializeOwned;
use ::serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A type that can be serialized to JSON with camelCase object keys.
///
/// Every object key produced by the type's `Serialize` implementation is
/// rewritten to camelCase, recursively, including map keys. Keys that are
/// already camelCase pass through unchanged, so types annotated with
/// `#[serde(rename_all = "camelCase")]` serialize identically either way.
///
/// # Blanket Implementation
///
/// Implemented for every `T: Serialize`:
///
/// ```
/// use serde::Serialize;
/// use mqapi_core::serde::CamelCasePipeline;
///
/// #[derive(Serialize)]
/// struct Order {
///     order_id: u32,
///     customer_name: String,
/// }
///
/// let order = Order { order_id: 7, customer_name: "Ada".to_string() };
/// let json = order.to_camel_case_string().unwrap();
///
/// assert_eq!(json, r#"{"orderId":7,"customerName":"Ada"}"#);
/// ```
pub trait CamelCasePipeline: Serialize {
    /// Serialize to a JSON value with camelCase keys.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails (e.g., for
    /// maps with non-string keys).
    fn to_camel_case_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self).map(camel_case_keys)
    }

    /// Serialize to a compact JSON string with camelCase keys.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    fn to_camel_case_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_camel_case_value()?)
    }
}

impl<T> CamelCasePipeline for T where T: Serialize + ?Sized {}

/// The reading side of [`CamelCasePipeline`].
///
/// Decodes JSON written with camelCase keys into a type whose fields keep
/// their Rust names. The text is first decoded as-is; when that fails with a
/// data error (missing field, wrong shape), every object key is rewritten to
/// snake_case and the decode is tried once more. If the second attempt fails
/// too, the error of the first attempt is returned.
///
/// Types annotated with `#[serde(rename_all = "camelCase")]` succeed on the
/// first attempt, so both styles of type read the same payload.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use mqapi_core::serde::{CamelCaseDecode, CamelCasePipeline};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Customer {
///     first_name: String,
///     loyalty_points: u32,
/// }
///
/// let ada = Customer { first_name: "Ada".to_string(), loyalty_points: 10 };
/// let json = ada.to_camel_case_string().unwrap();
///
/// assert_eq!(Customer::from_camel_case_str(&json).unwrap(), ada);
/// ```
pub trait CamelCaseDecode: DeserializeOwned {
    /// Decode a JSON string written with camelCase keys.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the text is not JSON or matches
    /// neither the type's own field names nor their snake_case form.
    fn from_camel_case_str(s: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str(s) {
            Ok(decoded) => Ok(decoded),
            Err(err) if err.is_data() => {
                let value: Value = serde_json::from_str(s)?;
                serde_json::from_value(snake_case_keys(value)).map_err(|_| err)
            }
            Err(err) => Err(err),
        }
    }

    /// Decode a JSON value written with camelCase keys.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the value matches neither the type's
    /// own field names nor their snake_case form.
    fn from_camel_case_value(value: Value) -> Result<Self, serde_json::Error> {
        match Self::deserialize(&value) {
            Ok(decoded) => Ok(decoded),
            Err(err) => serde_json::from_value(snake_case_keys(value)).map_err(|_| err),
        }
    }
}

impl<T> CamelCaseDecode for T where T: DeserializeOwned {}

/// Rewrite every object key in `value` to camelCase, recursively.
pub fn camel_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (to_camel_case(&key), camel_case_keys(value)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camel_case_keys).collect()),
        other => other,
    }
}

/// Rewrite every object key in `value` to snake_case, recursively.
pub fn snake_case_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (to_snake_case(&key), snake_case_keys(value)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(snake_case_keys).collect()),
        other => other,
    }
}

/// Convert a single camelCase identifier to snake_case.
///
/// Reverses [`to_camel_case`] for lowercase snake_case names. An uppercase
/// run counts as one word (`userID` becomes `user_id`). Leading underscores
/// are kept.
///
/// ```
/// use mqapi_core::serde::to_snake_case;
///
/// assert_eq!(to_snake_case("customerId"), "customer_id");
/// assert_eq!(to_snake_case("urlValue"), "url_value");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = match prev {
                Some(p) if p == '_' => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next_is_lower,
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Convert a single identifier to camelCase.
///
/// `snake_case` segments are joined with each following segment capitalized.
/// A leading run of uppercase letters is lowered, except for the last one
/// when it starts the next word (`URLValue` becomes `urlValue`). Leading
/// underscores are kept.
///
/// ```
/// use mqapi_core::serde::to_camel_case;
///
/// assert_eq!(to_camel_case("customer_id"), "customerId");
/// assert_eq!(to_camel_case("CustomerId"), "customerId");
/// assert_eq!(to_camel_case("URLValue"), "urlValue");
/// assert_eq!(to_camel_case("alreadyCamel"), "alreadyCamel");
/// ```
pub fn to_camel_case(key: &str) -> String {
    let body = key.trim_start_matches('_');
    let prefix = &key[..key.len() - body.len()];

    let mut out = String::with_capacity(key.len());
    out.push_str(prefix);

    let mut segments = body.split('_').filter(|s| !s.is_empty());
    if let Some(first) = segments.next() {
        out.push_str(&lower_leading_run(first));
    }
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out
}

fn lower_leading_run(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len());

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            out.extend(chars[i..].iter());
            return out;
        }
        // An uppercase letter followed by a lowercase one starts the next word.
        let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
        if i > 0 && next_is_lower {
            out.extend(chars[i..].iter());
            return out;
        }
        out.extend(c.to_lowercase());
    }

    out
}
