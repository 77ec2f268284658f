//! Request body parse policy.
//!
//! A body that parses as JSON is handed to schema validation. Anything else
//! (an empty body, plain text, binary data, malformed JSON) is passed to the
//! handler as raw bytes without validation. The `content-type` header is not
//! consulted.

use bytes::Bytes;
use covenant_core::RequestBody;
use serde_json::Value;

/// Parses a request body as JSON, falling back to raw bytes.
///
/// # Example
///
/// ```rust
/// use bytes::Bytes;
/// use covenant_core::RequestBody;
/// use covenant_extract::parse_body;
/// use serde_json::json;
///
/// assert_eq!(parse_body(Bytes::from_static(br#"{"a":1}"#)), RequestBody::Json(json!({"a": 1})));
/// assert_eq!(parse_body(Bytes::from_static(b"hi")), RequestBody::Raw(Bytes::from_static(b"hi")));
/// ```
#[must_use]
pub fn parse_body(bytes: Bytes) -> RequestBody {
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(value) => RequestBody::Json(value),
        Err(_) => RequestBody::Raw(bytes),
    }
}
