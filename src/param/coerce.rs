//! Static coercion of raw values
//!
//! Raw values are JSON text. Each decoder accepts the most permissive form
//! consistent with its type: scalars may also arrive as JSON strings
//! (`"5"`), and durations may be quoted or bare humantime text (`1h30m`).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;

/// Decode a scalar from a JSON literal, or from a JSON string holding one
pub(crate) fn decode_scalar<T>(raw: &str) -> Result<T, String>
where
    T: DeserializeOwned + FromStr,
    T::Err: std::fmt::Display,
{
    match serde_json::from_str::<T>(raw) {
        Ok(value) => Ok(value),
        Err(err) => match serde_json::from_str::<String>(raw) {
            Ok(inner) => inner.trim().parse::<T>().map_err(|e| e.to_string()),
            Err(_) => Err(err.to_string()),
        },
    }
}

pub(crate) fn decode_string(raw: &str) -> Result<String, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

pub(crate) fn decode_duration(raw: &str) -> Result<Duration, String> {
    let text = serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string());
    humantime::parse_duration(text.trim()).map_err(|e| e.to_string())
}

pub(crate) fn decode_json<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

/// Help rendering of a default; `None` when it is a zero value
pub(crate) fn display_default<T: Serialize>(value: &T) -> Option<String> {
    let json = serde_json::to_value(value).ok()?;
    let is_zero = match &json {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        serde_json::Value::Object(o) => o.is_empty(),
    };
    if is_zero {
        None
    } else {
        Some(json.to_string())
    }
}

pub(crate) fn display_duration(value: &Duration) -> Option<String> {
    if value.is_zero() {
        None
    } else {
        Some(humantime::format_duration(*value).to_string())
    }
}
