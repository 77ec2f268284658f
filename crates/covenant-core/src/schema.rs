//! Bundled JSON schema engine.
//!
//! [`Schema`] is the default [`Validator`] used by route contracts. It covers
//! the shapes HTTP contracts usually need: objects with required, optional,
//! defaulted and nullable fields, strings, integers, numbers, booleans,
//! literals and arrays. Query and path values arrive as strings, so scalar
//! schemas can opt into coercion with [`Schema::coerce`].
//!
//! Parsing returns a new value: defaults are filled in, coerced scalars are
//! converted and unknown object keys are handled according to the object's
//! [`UnknownKeys`] policy.
//!
//! # Example
//!
//! ```
//! use covenant_core::Schema;
//! use covenant_core::validation::{ValidateOptions, Validator};
//! use serde_json::json;
//!
//! let schema = Schema::object([
//!     ("title", Schema::string().min_length(1).required()),
//!     ("published", Schema::boolean().default(json!(false))),
//!     ("tags", Schema::array(Schema::string())),
//! ]);
//!
//! let parsed = schema
//!     .parse(&json!({"title": "Hello", "tags": ["rust"]}), &ValidateOptions::strict())
//!     .unwrap();
//! assert_eq!(parsed, json!({"title": "Hello", "published": false, "tags": ["rust"]}));
//!
//! let err = schema.parse(&json!({}), &ValidateOptions::strict()).unwrap_err();
//! assert_eq!(err.issues[0].path_string(), "$.title");
//! ```

use crate::validation::{
    Issue, IssueCode, PathSegment, ValidateOptions, ValidationError, ValidationResult, Validator,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// What an object schema does with keys it does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Drop undeclared keys from the parsed value.
    #[default]
    Strip,
    /// Reject values carrying undeclared keys.
    Strict,
    /// Keep undeclared keys unchanged.
    Passthrough,
}

/// The type-specific part of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaKind {
    /// String type.
    String {
        /// Minimum length in characters.
        min_length: Option<usize>,
        /// Maximum length in characters.
        max_length: Option<usize>,
    },
    /// Integer type.
    Integer {
        /// Minimum value.
        minimum: Option<i64>,
        /// Maximum value.
        maximum: Option<i64>,
    },
    /// Number (float) type.
    Number {
        /// Minimum value.
        minimum: Option<f64>,
        /// Maximum value.
        maximum: Option<f64>,
    },
    /// Boolean type.
    Boolean,
    /// Exactly one JSON value.
    Literal {
        /// The accepted value.
        value: Value,
    },
    /// Array type.
    Array {
        /// Schema for array items.
        items: Box<Schema>,
        /// Minimum number of items.
        min_items: Option<usize>,
        /// Maximum number of items.
        max_items: Option<usize>,
    },
    /// Object type.
    Object {
        /// Declared properties, in declaration order.
        properties: IndexMap<String, Schema>,
        /// Policy for undeclared keys.
        #[serde(default)]
        unknown_keys: UnknownKeys,
    },
    /// Any value.
    Any,
    /// Only `null`.
    Null,
}

/// A JSON schema with field-level modifiers.
///
/// Fields are optional unless marked [`required`](Self::required). A field
/// with a [`default`](Self::default) is never reported missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(flatten)]
    kind: SchemaKind,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    coerce: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
}

impl Schema {
    fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            required: false,
            nullable: false,
            coerce: false,
            default: None,
        }
    }

    /// Creates a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::of(SchemaKind::String {
            min_length: None,
            max_length: None,
        })
    }

    /// Creates an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::of(SchemaKind::Integer {
            minimum: None,
            maximum: None,
        })
    }

    /// Creates a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::of(SchemaKind::Number {
            minimum: None,
            maximum: None,
        })
    }

    /// Creates a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    /// Creates a schema accepting exactly `value`.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::of(SchemaKind::Literal {
            value: value.into(),
        })
    }

    /// Creates an array schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::of(SchemaKind::Array {
            items: Box::new(items),
            min_items: None,
            max_items: None,
        })
    }

    /// Creates an object schema from `(name, schema)` pairs.
    #[must_use]
    pub fn object<'a>(properties: impl IntoIterator<Item = (&'a str, Schema)>) -> Self {
        Self::of(SchemaKind::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            unknown_keys: UnknownKeys::Strip,
        })
    }

    /// Creates a schema accepting any value.
    #[must_use]
    pub fn any() -> Self {
        Self::of(SchemaKind::Any)
    }

    /// Creates a schema accepting only `null`.
    #[must_use]
    pub fn null() -> Self {
        Self::of(SchemaKind::Null)
    }

    /// Returns the type-specific part of the schema.
    #[must_use]
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Marks this schema as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks this schema as optional (the default).
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Accepts `null` in addition to the declared type.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Fills in `value` when the field is missing. Implies optional.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    /// Converts string input to the declared scalar type before checking.
    ///
    /// Applies to integer, number, boolean (`"true"`/`"false"`/`"1"`/`"0"`)
    /// and string (numbers and booleans are stringified) schemas.
    #[must_use]
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Returns whether a missing field is reported as an error.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required && self.default.is_none()
    }

    /// Sets the minimum length for string schemas.
    #[must_use]
    pub fn min_length(mut self, len: usize) -> Self {
        if let SchemaKind::String { min_length, .. } = &mut self.kind {
            *min_length = Some(len);
        }
        self
    }

    /// Sets the maximum length for string schemas.
    #[must_use]
    pub fn max_length(mut self, len: usize) -> Self {
        if let SchemaKind::String { max_length, .. } = &mut self.kind {
            *max_length = Some(len);
        }
        self
    }

    /// Sets the minimum value for integer schemas.
    #[must_use]
    pub fn minimum_int(mut self, min: i64) -> Self {
        if let SchemaKind::Integer { minimum, .. } = &mut self.kind {
            *minimum = Some(min);
        }
        self
    }

    /// Sets the maximum value for integer schemas.
    #[must_use]
    pub fn maximum_int(mut self, max: i64) -> Self {
        if let SchemaKind::Integer { maximum, .. } = &mut self.kind {
            *maximum = Some(max);
        }
        self
    }

    /// Sets the minimum value for number schemas.
    #[must_use]
    pub fn minimum(mut self, min: f64) -> Self {
        if let SchemaKind::Number { minimum, .. } = &mut self.kind {
            *minimum = Some(min);
        }
        self
    }

    /// Sets the maximum value for number schemas.
    #[must_use]
    pub fn maximum(mut self, max: f64) -> Self {
        if let SchemaKind::Number { maximum, .. } = &mut self.kind {
            *maximum = Some(max);
        }
        self
    }

    /// Sets the minimum number of items for array schemas.
    #[must_use]
    pub fn min_items(mut self, min: usize) -> Self {
        if let SchemaKind::Array { min_items, .. } = &mut self.kind {
            *min_items = Some(min);
        }
        self
    }

    /// Sets the maximum number of items for array schemas.
    #[must_use]
    pub fn max_items(mut self, max: usize) -> Self {
        if let SchemaKind::Array { max_items, .. } = &mut self.kind {
            *max_items = Some(max);
        }
        self
    }

    /// Rejects undeclared keys (object schemas only).
    #[must_use]
    pub fn strict(self) -> Self {
        self.unknown_keys(UnknownKeys::Strict)
    }

    /// Keeps undeclared keys (object schemas only).
    #[must_use]
    pub fn passthrough(self) -> Self {
        self.unknown_keys(UnknownKeys::Passthrough)
    }

    fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        if let SchemaKind::Object { unknown_keys, .. } = &mut self.kind {
            *unknown_keys = policy;
        }
        self
    }

    fn expected(&self) -> &'static str {
        match &self.kind {
            SchemaKind::String { .. } => "string",
            SchemaKind::Integer { .. } => "integer",
            SchemaKind::Number { .. } => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Literal { .. } => "literal",
            SchemaKind::Array { .. } => "array",
            SchemaKind::Object { .. } => "object",
            SchemaKind::Any => "any",
            SchemaKind::Null => "null",
        }
    }

    /// Parses `value`, pushing every problem onto `cx.issues`.
    ///
    /// Returns `None` when this value (not necessarily its parent) is invalid.
    fn parse_at(&self, value: &Value, cx: &mut ParseContext, top_level: bool) -> Option<Value> {
        if value.is_null() && (self.nullable || matches!(self.kind, SchemaKind::Any | SchemaKind::Null)) {
            return Some(Value::Null);
        }

        match &self.kind {
            SchemaKind::String {
                min_length,
                max_length,
            } => {
                let s = match (value, self.coerce) {
                    (Value::String(s), _) => s.clone(),
                    (Value::Number(n), true) => n.to_string(),
                    (Value::Bool(b), true) => b.to_string(),
                    _ => return cx.type_mismatch(self.expected(), value),
                };

                let len = s.chars().count();
                if let Some(min) = min_length.filter(|min| len < *min) {
                    return cx.fail(
                        IssueCode::TooSmall,
                        format!("string must contain at least {min} character(s)"),
                    );
                }
                if let Some(max) = max_length.filter(|max| len > *max) {
                    return cx.fail(
                        IssueCode::TooBig,
                        format!("string must contain at most {max} character(s)"),
                    );
                }
                Some(Value::String(s))
            }

            SchemaKind::Integer { minimum, maximum } => {
                let n = match (value, self.coerce) {
                    (Value::Number(n), _) => integral(n),
                    (Value::String(s), true) => s.trim().parse::<i64>().ok(),
                    _ => None,
                };
                let Some(n) = n else {
                    return cx.type_mismatch(self.expected(), value);
                };

                if let Some(min) = minimum.filter(|min| n < *min) {
                    return cx.fail(
                        IssueCode::TooSmall,
                        format!("value must be greater than or equal to {min}"),
                    );
                }
                if let Some(max) = maximum.filter(|max| n > *max) {
                    return cx.fail(
                        IssueCode::TooBig,
                        format!("value must be less than or equal to {max}"),
                    );
                }
                Some(Value::from(n))
            }

            SchemaKind::Number { minimum, maximum } => {
                let parsed = match (value, self.coerce) {
                    (Value::Number(n), _) => Some(n.clone()),
                    (Value::String(s), true) => parse_number(s.trim()),
                    _ => None,
                };
                let Some(parsed) = parsed else {
                    return cx.type_mismatch(self.expected(), value);
                };

                let n = parsed.as_f64().unwrap_or(f64::NAN);
                if let Some(min) = minimum.filter(|min| n < *min) {
                    return cx.fail(
                        IssueCode::TooSmall,
                        format!("value must be greater than or equal to {min}"),
                    );
                }
                if let Some(max) = maximum.filter(|max| n > *max) {
                    return cx.fail(
                        IssueCode::TooBig,
                        format!("value must be less than or equal to {max}"),
                    );
                }
                Some(Value::Number(parsed))
            }

            SchemaKind::Boolean => {
                let b = match (value, self.coerce) {
                    (Value::Bool(b), _) => Some(*b),
                    (Value::String(s), true) => match s.as_str() {
                        "true" | "1" => Some(true),
                        "false" | "0" => Some(false),
                        _ => None,
                    },
                    _ => None,
                };
                match b {
                    Some(b) => Some(Value::Bool(b)),
                    None => cx.type_mismatch(self.expected(), value),
                }
            }

            SchemaKind::Literal { value: expected } => {
                if value == expected {
                    Some(value.clone())
                } else {
                    cx.fail(
                        IssueCode::InvalidLiteral,
                        format!("expected literal {expected}, received {value}"),
                    )
                }
            }

            SchemaKind::Array {
                items,
                min_items,
                max_items,
            } => {
                let Some(arr) = value.as_array() else {
                    return cx.type_mismatch(self.expected(), value);
                };

                if let Some(min) = min_items.filter(|min| arr.len() < *min) {
                    return cx.fail(
                        IssueCode::TooSmall,
                        format!("array must contain at least {min} item(s)"),
                    );
                }
                if let Some(max) = max_items.filter(|max| arr.len() > *max) {
                    return cx.fail(
                        IssueCode::TooBig,
                        format!("array must contain at most {max} item(s)"),
                    );
                }

                let mut out = Vec::with_capacity(arr.len());
                let mut valid = true;
                for (idx, item) in arr.iter().enumerate() {
                    cx.path.push(PathSegment::Index(idx));
                    match items.parse_at(item, cx, false) {
                        Some(parsed) => out.push(parsed),
                        None => valid = false,
                    }
                    cx.path.pop();
                }
                valid.then_some(Value::Array(out))
            }

            SchemaKind::Object {
                properties,
                unknown_keys,
            } => {
                let Some(obj) = value.as_object() else {
                    return cx.type_mismatch(self.expected(), value);
                };

                let mut out = Map::new();
                let mut valid = true;

                for (key, prop) in properties {
                    cx.path.push(PathSegment::Key(key.clone()));
                    match obj.get(key) {
                        Some(prop_value) => match prop.parse_at(prop_value, cx, false) {
                            Some(parsed) => {
                                out.insert(key.clone(), parsed);
                            }
                            None => valid = false,
                        },
                        None => {
                            if let Some(default) = &prop.default {
                                out.insert(key.clone(), default.clone());
                            } else if prop.is_required() {
                                cx.fail(IssueCode::Required, "Required");
                                valid = false;
                            }
                        }
                    }
                    cx.path.pop();
                }

                let policy = if top_level && cx.options.pass_through_extra_keys {
                    UnknownKeys::Passthrough
                } else {
                    *unknown_keys
                };
                let unknown: Vec<&String> = obj
                    .keys()
                    .filter(|key| !properties.contains_key(*key))
                    .collect();

                match policy {
                    UnknownKeys::Strip => {}
                    UnknownKeys::Passthrough if !unknown.is_empty() => {
                        // Keys keep their input order; defaulted keys follow.
                        let mut ordered = Map::with_capacity(obj.len() + out.len());
                        for (key, raw) in obj {
                            if !properties.contains_key(key) {
                                ordered.insert(key.clone(), raw.clone());
                            } else if let Some(parsed) = out.get(key) {
                                ordered.insert(key.clone(), parsed.clone());
                            }
                        }
                        for (key, value) in &out {
                            if !obj.contains_key(key) {
                                ordered.insert(key.clone(), value.clone());
                            }
                        }
                        out = ordered;
                    }
                    UnknownKeys::Passthrough => {}
                    UnknownKeys::Strict if !unknown.is_empty() => {
                        let names: Vec<&str> = unknown.iter().map(|k| k.as_str()).collect();
                        cx.fail(
                            IssueCode::UnrecognizedKeys,
                            format!("unrecognized key(s) in object: {}", names.join(", ")),
                        );
                        valid = false;
                    }
                    UnknownKeys::Strict => {}
                }

                valid.then_some(Value::Object(out))
            }

            SchemaKind::Any => Some(value.clone()),

            SchemaKind::Null => cx.type_mismatch(self.expected(), value),
        }
    }
}

impl Validator for Schema {
    fn parse(&self, value: &Value, options: &ValidateOptions) -> ValidationResult {
        let mut cx = ParseContext {
            options,
            path: Vec::new(),
            issues: Vec::new(),
        };
        match self.parse_at(value, &mut cx, true) {
            Some(parsed) if cx.issues.is_empty() => Ok(parsed),
            _ => Err(ValidationError::new(cx.issues)),
        }
    }
}

struct ParseContext<'a> {
    options: &'a ValidateOptions,
    path: Vec<PathSegment>,
    issues: Vec<Issue>,
}

impl ParseContext<'_> {
    fn fail(&mut self, code: IssueCode, message: impl Into<String>) -> Option<Value> {
        self.issues.push(Issue::new(code, self.path.clone(), message));
        None
    }

    fn type_mismatch(&mut self, expected: &str, value: &Value) -> Option<Value> {
        self.fail(
            IssueCode::InvalidType,
            format!("expected {expected}, received {}", value_type_name(value)),
        )
    }
}

/// Returns `n` as an integer if it has no fractional part.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0)
            .map(|f| f as i64)
    })
}

/// Parses a numeric string, preferring an integer representation.
fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Returns a human-readable name for a JSON value type.
fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn strict(schema: &Schema, value: Value) -> ValidationResult {
        schema.parse(&value, &ValidateOptions::strict())
    }

    #[test]
    fn test_string_schema_validation() {
        let schema = Schema::string().min_length(2).max_length(10);

        assert!(strict(&schema, json!("hello")).is_ok());
        assert!(strict(&schema, json!("a")).is_err());
        assert!(strict(&schema, json!("hello world!")).is_err());
        assert!(strict(&schema, json!(123)).is_err());
    }

    #[test]
    fn test_integer_schema_validation() {
        let schema = Schema::integer().minimum_int(0).maximum_int(100);

        assert!(strict(&schema, json!(50)).is_ok());
        assert!(strict(&schema, json!(0)).is_ok());
        assert!(strict(&schema, json!(100)).is_ok());
        assert!(strict(&schema, json!(-1)).is_err());
        assert!(strict(&schema, json!(101)).is_err());
        assert!(strict(&schema, json!("50")).is_err());
        assert!(strict(&schema, json!(1.5)).is_err());
        assert_eq!(strict(&schema, json!(3.0)).unwrap(), json!(3));
    }

    #[test]
    fn test_number_schema_validation() {
        let schema = Schema::number().minimum(0.5).maximum(2.5);

        assert!(strict(&schema, json!(1)).is_ok());
        assert!(strict(&schema, json!(2.5)).is_ok());
        assert!(strict(&schema, json!(0.1)).is_err());
        assert!(strict(&schema, json!("1")).is_err());
    }

    #[test]
    fn test_coercion_from_strings() {
        assert_eq!(strict(&Schema::number().coerce(), json!("5")).unwrap(), json!(5));
        assert_eq!(strict(&Schema::number().coerce(), json!("1.5")).unwrap(), json!(1.5));
        assert_eq!(strict(&Schema::integer().coerce(), json!(" 42 ")).unwrap(), json!(42));
        assert_eq!(strict(&Schema::boolean().coerce(), json!("true")).unwrap(), json!(true));
        assert_eq!(strict(&Schema::boolean().coerce(), json!("0")).unwrap(), json!(false));
        assert_eq!(strict(&Schema::string().coerce(), json!(7)).unwrap(), json!("7"));

        assert!(strict(&Schema::number().coerce(), json!("abc")).is_err());
        assert!(strict(&Schema::boolean().coerce(), json!("yes")).is_err());
    }

    #[test]
    fn test_boolean_schema_validation() {
        let schema = Schema::boolean();

        assert!(strict(&schema, json!(true)).is_ok());
        assert!(strict(&schema, json!(false)).is_ok());
        assert!(strict(&schema, json!("true")).is_err());
        assert!(strict(&schema, json!(1)).is_err());
    }

    #[test]
    fn test_literal_schema() {
        let schema = Schema::literal("v1");
        assert!(strict(&schema, json!("v1")).is_ok());
        let err = strict(&schema, json!("v2")).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::InvalidLiteral);
    }

    #[test]
    fn test_array_schema_validation() {
        let schema = Schema::array(Schema::integer()).min_items(1).max_items(3);

        assert!(strict(&schema, json!([1, 2, 3])).is_ok());
        assert!(strict(&schema, json!([1])).is_ok());
        assert!(strict(&schema, json!([])).is_err());
        assert!(strict(&schema, json!([1, 2, 3, 4])).is_err());
        assert!(strict(&schema, json!([1, "two", 3])).is_err());
    }

    #[test]
    fn test_object_schema_validation() {
        let schema = Schema::object([
            ("name", Schema::string().required()),
            ("age", Schema::integer()),
            ("email", Schema::string()),
        ]);

        assert!(strict(
            &schema,
            json!({"name": "Alice", "age": 30, "email": "alice@example.com"})
        )
        .is_ok());
        assert!(strict(&schema, json!({"name": "Bob"})).is_ok());
        assert!(strict(&schema, json!({"age": 30})).is_err());
        assert!(strict(&schema, json!({"name": 123})).is_err());
        assert!(strict(&schema, json!("not an object")).is_err());
    }

    #[test]
    fn test_missing_required_field_is_reported_with_path() {
        let schema = Schema::object([("title", Schema::string().required())]);

        let err = strict(&schema, json!({})).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].code, IssueCode::Required);
        assert_eq!(err.issues[0].path, vec![PathSegment::Key("title".into())]);
    }

    #[test]
    fn test_default_fills_missing_field() {
        let schema = Schema::object([("x", Schema::integer().default(0))]);

        assert_eq!(strict(&schema, json!({})).unwrap(), json!({"x": 0}));
        assert_eq!(strict(&schema, json!({"x": 5})).unwrap(), json!({"x": 5}));
    }

    #[test]
    fn test_default_overrides_required() {
        let schema = Schema::string().required().default("n/a");
        assert!(!schema.is_required());
    }

    #[test]
    fn test_nullable() {
        let schema = Schema::object([("description", Schema::string().nullable())]);
        assert!(strict(&schema, json!({"description": null})).is_ok());

        let schema = Schema::object([("description", Schema::string())]);
        assert!(strict(&schema, json!({"description": null})).is_err());
    }

    #[test]
    fn test_collects_all_issues() {
        let schema = Schema::object([
            ("a", Schema::string().required()),
            ("b", Schema::integer().required()),
            ("c", Schema::boolean()),
        ]);

        let err = strict(&schema, json!({"c": "nope"})).unwrap_err();
        assert_eq!(err.issues.len(), 3);
        let paths: Vec<String> = err.issues.iter().map(Issue::path_string).collect();
        assert_eq!(paths, vec!["$.a", "$.b", "$.c"]);
    }

    #[test]
    fn test_unknown_keys_are_stripped_by_default() {
        let schema = Schema::object([("name", Schema::string())]);
        let parsed = strict(&schema, json!({"name": "a", "extra": 1})).unwrap();
        assert_eq!(parsed, json!({"name": "a"}));
    }

    #[test]
    fn test_strict_object_rejects_unknown_keys() {
        let schema = Schema::object([("name", Schema::string())]).strict();
        let err = strict(&schema, json!({"name": "a", "extra": 1})).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::UnrecognizedKeys);
        assert!(err.issues[0].message.contains("extra"));
    }

    #[test]
    fn test_passthrough_object_keeps_unknown_keys() {
        let schema = Schema::object([("name", Schema::string())]).passthrough();
        let parsed = strict(&schema, json!({"name": "a", "extra": 1})).unwrap();
        assert_eq!(parsed, json!({"name": "a", "extra": 1}));
    }

    #[test]
    fn test_passthrough_keeps_input_key_order() {
        let schema = Schema::object([
            ("id", Schema::integer().required()),
            ("tag", Schema::string().default("none")),
        ])
        .passthrough();
        let parsed = strict(&schema, json!({"zeta": true, "id": 3, "alpha": "x"})).unwrap();

        let keys: Vec<&String> = parsed.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "id", "alpha", "tag"]);
    }

    #[test]
    fn test_pass_through_option_overrides_strict_top_level() {
        let schema = Schema::object([("x-api-key", Schema::string().required())]).strict();
        let headers = json!({"x-api-key": "secret", "user-agent": "curl"});

        let parsed = schema
            .parse(&headers, &ValidateOptions::pass_through())
            .unwrap();
        assert_eq!(parsed, headers);

        assert!(schema.parse(&headers, &ValidateOptions::strict()).is_err());
    }

    #[test]
    fn test_pass_through_option_is_top_level_only() {
        let schema = Schema::object([(
            "nested",
            Schema::object([("a", Schema::integer())]).strict(),
        )]);
        let value = json!({"nested": {"a": 1, "b": 2}});

        assert!(schema
            .parse(&value, &ValidateOptions::pass_through())
            .is_err());
    }

    #[test]
    fn test_nested_object_validation() {
        let address = Schema::object([
            ("street", Schema::string().required()),
            ("city", Schema::string().required()),
        ]);
        let user = Schema::object([
            ("name", Schema::string().required()),
            ("address", address.required()),
        ]);

        assert!(strict(
            &user,
            json!({"name": "Alice", "address": {"street": "123 Main St", "city": "Springfield"}})
        )
        .is_ok());

        let err = strict(
            &user,
            json!({"name": "Alice", "address": {"street": "123 Main St"}}),
        )
        .unwrap_err();
        assert_eq!(err.issues[0].path_string(), "$.address.city");
    }

    #[test]
    fn test_validation_error_paths() {
        let schema = Schema::object([(
            "users",
            Schema::array(Schema::object([("name", Schema::string().required())])),
        )]);

        let err = strict(&schema, json!({"users": [{"name": "Alice"}, {"name": 123}]})).unwrap_err();
        assert_eq!(err.issues[0].path_string(), "$.users[1].name");
    }

    #[test]
    fn test_any_and_null_schemas() {
        assert!(strict(&Schema::any(), json!({"any": "thing"})).is_ok());
        assert!(strict(&Schema::any(), json!(null)).is_ok());
        assert!(strict(&Schema::null(), json!(null)).is_ok());
        assert!(strict(&Schema::null(), json!("not null")).is_err());
    }

    #[test]
    fn test_schema_serialization_round_trip() {
        let schema = Schema::object([
            ("name", Schema::string().required()),
            ("count", Schema::integer().default(0)),
        ])
        .strict();

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "object");
        assert_eq!(json["unknown_keys"], "strict");

        let back: Schema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }

    proptest! {
        #[test]
        fn prop_coerced_integer_matches_source(n in any::<i64>()) {
            let parsed = strict(&Schema::integer().coerce(), json!(n.to_string())).unwrap();
            prop_assert_eq!(parsed, json!(n));
        }

        #[test]
        fn prop_strip_keeps_only_declared_keys(
            extra in proptest::collection::btree_map("[a-z]{1,8}", any::<i32>(), 0..6)
        ) {
            let schema = Schema::object([("id", Schema::integer().required())]);
            let mut value = json!({"id": 1});
            for (key, v) in &extra {
                if key != "id" {
                    value[key.as_str()] = json!(v);
                }
            }
            prop_assert_eq!(strict(&schema, value).unwrap(), json!({"id": 1}));
        }
    }
}
