//! Shape-checked JSON decoding for the platform's object envelopes.
//!
//! Derived `Deserialize` impls also accept a JSON array for a struct, and with every field
//! defaulted `[]` would decode as an empty envelope. Envelopes must be objects; `null`
//! reads as the empty envelope.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const EXPECTED_OBJECT: &str = "expected a JSON object";

/// Decode a top-level envelope, accepting only a JSON object or `null`.
pub fn from_object_slice<T>(json: &[u8]) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice::<Value>(json)? {
        Value::Null => Ok(T::default()),
        value @ Value::Object(_) => serde_json::from_value(value),
        _ => Err(serde_json::Error::custom(EXPECTED_OBJECT)),
    }
}

pub fn from_object_str<T>(json: &str) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    from_object_slice(json.as_bytes())
}

/// `deserialize_with` helper for nested envelopes: an object decodes to `Some`, `null` to
/// `None`, anything else is an error.
pub fn object_or_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value @ Value::Object(_) => T::deserialize(value).map(Some).map_err(D::Error::custom),
        _ => Err(D::Error::custom(EXPECTED_OBJECT)),
    }
}
