//! Field decoders that never fail on bad shapes.
//!
//! Stored documents may come from older builds or be edited by hand, so every
//! numeric field coerces to zero and every string field falls back to empty
//! instead of rejecting the whole record.

use crate::domain::EndReason;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Largest stored count or duration accepted; anything above is malformed
pub const MAX_STORED_VALUE: u64 = u32::MAX as u64;

/// Coerce any JSON value into a non-negative integer. Values that cannot be
/// a real duration or count decode as zero.
pub fn coerce_u64(value: &Value) -> u64 {
    let from_float = |f: f64| {
        if f.is_finite() && f > 0.0 && f <= MAX_STORED_VALUE as f64 {
            f as u64
        } else {
            0
        }
    };

    let n = match value {
        Value::Number(n) => n.as_u64().unwrap_or_else(|| n.as_f64().map(from_float).unwrap_or(0)),
        Value::String(s) => s.trim().parse::<f64>().map(from_float).unwrap_or(0),
        _ => 0,
    };
    if n > MAX_STORED_VALUE {
        0
    } else {
        n
    }
}

pub fn u64_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u64(&value))
}

pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    })
}

pub fn end_reason<'de, D>(deserializer: D) -> Result<EndReason, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(EndReason::from_tag)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_numbers() {
        assert_eq!(coerce_u64(&json!(1500)), 1500);
        assert_eq!(coerce_u64(&json!(59.9)), 59);
        assert_eq!(coerce_u64(&json!("600")), 600);
        assert_eq!(coerce_u64(&json!(" 42 ")), 42);
    }

    #[test]
    fn test_coerce_garbage_to_zero() {
        assert_eq!(coerce_u64(&json!(-5)), 0);
        assert_eq!(coerce_u64(&json!(null)), 0);
        assert_eq!(coerce_u64(&json!("abc")), 0);
        assert_eq!(coerce_u64(&json!([1, 2])), 0);
        assert_eq!(coerce_u64(&json!({"n": 1})), 0);
    }

    #[test]
    fn test_implausibly_large_values_are_zero() {
        assert_eq!(coerce_u64(&json!(1e30)), 0);
        assert_eq!(coerce_u64(&json!("1e19")), 0);
        assert_eq!(coerce_u64(&json!(u64::MAX)), 0);
        assert_eq!(coerce_u64(&json!(MAX_STORED_VALUE)), MAX_STORED_VALUE);
    }
}
