//! Lenient parsing of persisted values
//!
//! Stored payloads may come from hand edits or older builds. Numeric fields
//! accept numbers, numeric strings, booleans and null; anything that is not a
//! number coerces to 0. Range checks happen later, on read.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value to a finite float (0 when not numeric)
pub fn coerce_f64(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Coerce a JSON value to an integer, truncating fractions
pub fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i,
            (None, Some(_)) => i64::MAX,
            (None, None) => coerce_f64(value) as i64,
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .unwrap_or_else(|_| coerce_f64(value) as i64),
        _ => coerce_f64(value) as i64,
    }
}

/// Coerce a JSON value to a string; null becomes empty
pub fn coerce_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| coerce_f64(&v))
}

pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| coerce_i64(&v))
}

pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(coerce_string)
}
