use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Safely parses a JSON value to a non-negative count.
/// Numbers (fractions truncated) and numeric strings are accepted; anything
/// else, including negatives, yields `None`.
pub fn safe_parse_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.trunc() as u64)
        }),
        Value::String(s) => safe_parse_count_str(s),
        _ => None,
    }
}

/// Safely parses a string to a non-negative count.
pub fn safe_parse_count_str(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<u64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f.trunc() as u64)
    })
}

/// Serde adapter for count fields sent by browser clients, which are not
/// always well-typed. Unusable values deserialize as `None` instead of
/// failing the whole body.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(safe_parse_count))
}

/// Serde adapter for free-text fields. Strings pass through and numbers are
/// rendered as text; booleans, arrays and objects read as absent.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Serde adapter for nested mappings. Only a JSON object is decoded into `T`;
/// any other shape, or an object `T` cannot accept, reads as absent.
pub fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(object @ Value::Object(_)) => serde_json::from_value(object).ok(),
        _ => None,
    })
}

/// Returns `None` for absent or whitespace-only strings.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
