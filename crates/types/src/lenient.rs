//! Field decoders that recover instead of failing.
//!
//! Each helper is used with `#[serde(default, deserialize_with = "...")]`:
//! `default` covers an absent key, the helper covers a present but
//! malformed value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::color::Color;

pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref()
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0))
}

pub(crate) fn counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    let Some(v) = v else {
        return Ok(0);
    };
    if let Some(n) = v.as_u64() {
        return Ok(n);
    }
    // Floats truncate toward zero; negatives clamp to zero.
    Ok(v.as_f64()
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n as u64)
        .unwrap_or(0))
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

pub(crate) fn color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer).map(Color::from)
}

/// Decode a nested record, falling back to its default when the value is
/// not an object.
pub(crate) fn record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}

/// Decode a sequence of records, dropping entries that are not objects.
pub(crate) fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = v else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "number")]
        n: f64,
        #[serde(default, deserialize_with = "counter")]
        c: u64,
        #[serde(default, deserialize_with = "text")]
        t: String,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_fields_are_zero_or_empty() {
        let p = probe("{}");
        assert_eq!(p.n, 0.0);
        assert_eq!(p.c, 0);
        assert_eq!(p.t, "");
    }

    #[test]
    fn wrong_typed_fields_are_zero_or_empty() {
        let p = probe(r#"{"n":"12","c":[1],"t":{"a":1}}"#);
        assert_eq!(p.n, 0.0);
        assert_eq!(p.c, 0);
        assert_eq!(p.t, "");
    }

    #[test]
    fn null_fields_are_zero() {
        let p = probe(r#"{"n":null,"c":null,"t":null}"#);
        assert_eq!(p.n, 0.0);
        assert_eq!(p.c, 0);
    }

    #[test]
    fn counter_truncates_floats_and_clamps_negatives() {
        assert_eq!(probe(r#"{"c":3.9}"#).c, 3);
        assert_eq!(probe(r#"{"c":-4}"#).c, 0);
        assert_eq!(probe(r#"{"c":-0.5}"#).c, 0);
    }

    #[test]
    fn text_accepts_numbers() {
        assert_eq!(probe(r#"{"t":42}"#).t, "42");
    }
}
