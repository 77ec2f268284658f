//! Header normalization.

use http::HeaderMap;
use serde_json::{Map, Value};

/// Separator used when a header appears more than once.
pub const HEADER_VALUE_SEPARATOR: &str = ", ";

/// Converts a header map into a JSON object of strings.
///
/// Names are lower-case (as `http` stores them). Repeated headers are
/// joined with `", "`. Values that are not valid UTF-8 are decoded lossily.
///
/// # Example
///
/// ```rust
/// use covenant_extract::normalize_headers;
/// use http::HeaderMap;
/// use serde_json::json;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("X-Api-Key", "secret".parse().unwrap());
/// headers.append("accept", "text/html".parse().unwrap());
/// headers.append("accept", "application/json".parse().unwrap());
///
/// let normalized = normalize_headers(&headers);
/// assert_eq!(
///     serde_json::Value::Object(normalized),
///     json!({"x-api-key": "secret", "accept": "text/html, application/json"})
/// );
/// ```
#[must_use]
pub fn normalize_headers(headers: &HeaderMap) -> Map<String, Value> {
    let mut out = Map::with_capacity(headers.keys_len());
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect::<Vec<_>>()
            .join(HEADER_VALUE_SEPARATOR);
        out.insert(name.as_str().to_string(), Value::String(joined));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{HeaderName, HeaderValue};
    use serde_json::json;

    #[test]
    fn test_empty_headers() {
        assert!(normalize_headers(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_names_are_lower_case() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("content-type"),
            HeaderValue::from_static("application/json"),
        );
        headers.insert("X-Request-Id", HeaderValue::from_static("abc"));

        let normalized = normalize_headers(&headers);
        assert_eq!(normalized["content-type"], json!("application/json"));
        assert_eq!(normalized["x-request-id"], json!("abc"));
    }

    #[test]
    fn test_repeated_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append("x-forwarded-for", HeaderValue::from_static("10.0.0.1"));
        headers.append("x-forwarded-for", HeaderValue::from_static("10.0.0.2"));

        let normalized = normalize_headers(&headers);
        assert_eq!(normalized["x-forwarded-for"], json!("10.0.0.1, 10.0.0.2"));
    }

    #[test]
    fn test_non_utf8_values_are_lossy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-binary", HeaderValue::from_bytes(b"caf\xe9").unwrap());

        let normalized = normalize_headers(&headers);
        assert_eq!(normalized["x-binary"], json!("caf\u{fffd}"));
    }

    #[test]
    fn test_values_are_verbatim() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer  Token"));

        let normalized = normalize_headers(&headers);
        assert_eq!(normalized["authorization"], json!("Bearer  Token"));
    }
}
