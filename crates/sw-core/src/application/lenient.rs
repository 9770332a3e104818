//! Deserializers for values coming straight from form inputs.
//!
//! Inputs report unset selects as `""` and number fields may arrive as
//! strings; both are normalised here so stored records and patches share
//! one shape.

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(None),
        Some(Value::String(raw)) => serde_json::from_value(Value::String(raw.clone()))
            .or_else(|_| serde_json::from_str(raw.trim()))
            .map(Some)
            .map_err(D::Error::custom),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(D::Error::custom),
    }
}
