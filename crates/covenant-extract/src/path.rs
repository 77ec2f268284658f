//! Path parameter normalization.

use covenant_router::Params;
use serde_json::{Map, Value};

/// Converts extracted path parameters into a JSON object of strings.
///
/// Keys follow the template's placeholder order. If a placeholder name
/// repeats, the last value wins.
///
/// # Example
///
/// ```rust
/// use covenant_extract::params_to_map;
/// use covenant_router::PathTemplate;
/// use serde_json::json;
///
/// let params = PathTemplate::parse("/posts/:id").extract_params("/posts/42");
/// assert_eq!(serde_json::Value::Object(params_to_map(&params)), json!({"id": "42"}));
/// ```
#[must_use]
pub fn params_to_map(params: &Params) -> Map<String, Value> {
    params
        .iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect()
}
