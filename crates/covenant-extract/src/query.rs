//! Query string normalization.
//!
//! The query string is url-decoded into a flat JSON object of strings. When a
//! key repeats, the last value wins. In [`QueryMode::Json`] every value is
//! additionally decoded as JSON, so `?filter={"a":1}&take=5` yields an
//! object and a number.

use crate::ExtractionError;
use serde_json::{Map, Value};

/// How query values are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryMode {
    /// Every value is a JSON string.
    #[default]
    Plain,
    /// Every value is decoded as JSON, see [`decode_json_value`].
    Json,
}

impl QueryMode {
    /// Returns [`QueryMode::Json`] when `json_query` is set.
    #[must_use]
    pub fn from_flag(json_query: bool) -> Self {
        if json_query {
            Self::Json
        } else {
            Self::Plain
        }
    }
}

/// Decodes a raw query string into a JSON object.
///
/// # Example
///
/// ```rust
/// use covenant_extract::{normalize_query, QueryMode};
/// use serde_json::json;
///
/// let plain = normalize_query(Some("skip=0&take=5&take=10"), QueryMode::Plain).unwrap();
/// assert_eq!(serde_json::Value::Object(plain), json!({"skip": "0", "take": "10"}));
///
/// let decoded = normalize_query(Some("skip=0&name=alice"), QueryMode::Json).unwrap();
/// assert_eq!(serde_json::Value::Object(decoded), json!({"skip": 0, "name": "alice"}));
/// ```
pub fn normalize_query(
    raw_query: Option<&str>,
    mode: QueryMode,
) -> Result<Map<String, Value>, ExtractionError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw_query.unwrap_or_default())?;

    let mut out = Map::with_capacity(pairs.len());
    for (key, value) in pairs {
        let value = match mode {
            QueryMode::Plain => Value::String(value),
            QueryMode::Json => decode_json_value(value),
        };
        out.insert(key, value);
    }
    Ok(out)
}

/// Decodes a query value as JSON, keeping the raw string if it is not JSON.
///
/// `"5"` becomes `5`, `"true"` becomes `true`, `"[1,2]"` becomes an array,
/// while `"alice"` stays the string `"alice"`.
#[must_use]
pub fn decode_json_value(raw: String) -> Value {
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(_) => Value::String(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain(raw: &str) -> Value {
        Value::Object(normalize_query(Some(raw), QueryMode::Plain).unwrap())
    }

    fn decoded(raw: &str) -> Value {
        Value::Object(normalize_query(Some(raw), QueryMode::Json).unwrap())
    }

    #[test]
    fn test_empty_query() {
        assert!(normalize_query(None, QueryMode::Plain).unwrap().is_empty());
        assert!(normalize_query(Some(""), QueryMode::Json).unwrap().is_empty());
    }

    #[test]
    fn test_plain_values_are_strings() {
        assert_eq!(plain("skip=0&take=5"), json!({"skip": "0", "take": "5"}));
    }

    #[test]
    fn test_url_decoding() {
        assert_eq!(
            plain("q=hello%20world&tag=a+b&sym=%26%3D"),
            json!({"q": "hello world", "tag": "a b", "sym": "&="})
        );
    }

    #[test]
    fn test_last_value_wins() {
        assert_eq!(plain("a=1&a=2&a=3"), json!({"a": "3"}));
    }

    #[test]
    fn test_key_without_value() {
        assert_eq!(plain("flag&x="), json!({"flag": "", "x": ""}));
    }

    #[test]
    fn test_json_mode_decodes_values() {
        assert_eq!(
            decoded("take=5&draft=false&ids=%5B1%2C2%5D&filter=%7B%22a%22%3A1%7D&name=alice"),
            json!({"take": 5, "draft": false, "ids": [1, 2], "filter": {"a": 1}, "name": "alice"})
        );
    }

    #[test]
    fn test_decode_json_value_fallback() {
        assert_eq!(decode_json_value("null".into()), Value::Null);
        assert_eq!(decode_json_value("\"quoted\"".into()), json!("quoted"));
        assert_eq!(decode_json_value("{broken".into()), json!("{broken"));
        assert_eq!(decode_json_value(String::new()), json!(""));
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(QueryMode::from_flag(true), QueryMode::Json);
        assert_eq!(QueryMode::from_flag(false), QueryMode::Plain);
        assert_eq!(QueryMode::default(), QueryMode::Plain);
    }
}
