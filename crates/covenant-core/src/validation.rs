//! Schema validation seam.
//!
//! Route contracts do not depend on a particular schema engine. Every schema
//! is stored behind the [`Validator`] trait and invoked through
//! [`check_schema`], which gives all request parts the same contract:
//!
//! - an absent schema accepts the value unchanged
//! - a present schema returns the parsed value (defaults and coercions
//!   applied) or a structured [`ValidationError`]
//!
//! The bundled [`Schema`](crate::Schema) type implements [`Validator`]; other
//! engines can be plugged in by implementing the trait.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Result of validating a value: the parsed value or a structured error.
pub type ValidationResult<T = Value> = Result<T, ValidationError>;

/// Shared, type-erased schema as stored in route contracts.
pub type SchemaRef = Arc<dyn Validator>;

/// Options controlling a single validation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Keep keys that the top-level object schema does not declare.
    ///
    /// Used for headers and path params, where the transport always adds
    /// keys the contract does not mention. Query and body validation run
    /// with this disabled.
    pub pass_through_extra_keys: bool,
}

impl ValidateOptions {
    /// Options for strict validation (query, body, responses).
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            pass_through_extra_keys: false,
        }
    }

    /// Options for pass-through validation (headers, path params).
    #[must_use]
    pub const fn pass_through() -> Self {
        Self {
            pass_through_extra_keys: true,
        }
    }
}

/// A schema engine capable of parsing JSON values.
///
/// Implementations must not panic on malformed input; every rejection is
/// reported as a [`ValidationError`].
pub trait Validator: Send + Sync + fmt::Debug + 'static {
    /// Parses `value`, returning the validated (possibly transformed) value.
    fn parse(&self, value: &Value, options: &ValidateOptions) -> ValidationResult;
}

/// Validates `value` against an optional schema.
///
/// # Example
///
/// ```
/// use covenant_core::validation::{check_schema, ValidateOptions};
/// use covenant_core::Schema;
/// use serde_json::json;
///
/// // No schema: anything goes
/// let value = check_schema(json!({"a": 1}), None, ValidateOptions::strict()).unwrap();
/// assert_eq!(value, json!({"a": 1}));
///
/// let schema = Schema::object([("x", Schema::integer().default(json!(0)))]);
/// let value = check_schema(json!({}), Some(&schema), ValidateOptions::strict()).unwrap();
/// assert_eq!(value, json!({"x": 0}));
/// ```
pub fn check_schema(
    value: Value,
    schema: Option<&dyn Validator>,
    options: ValidateOptions,
) -> ValidationResult {
    match schema {
        Some(schema) => schema.parse(&value, &options),
        None => Ok(value),
    }
}

/// One element of the path to an offending value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object property name.
    Key(String),
    /// Array index.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, ".{key}"),
            Self::Index(idx) => write!(f, "[{idx}]"),
        }
    }
}

/// Machine-readable reason for a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The value has the wrong JSON type.
    InvalidType,
    /// A required property is missing.
    Required,
    /// The value does not equal the expected literal.
    InvalidLiteral,
    /// Length, range, or item count is below the minimum.
    TooSmall,
    /// Length, range, or item count is above the maximum.
    TooBig,
    /// The object carries keys the schema forbids.
    UnrecognizedKeys,
    /// Custom rejection reported by an external validator.
    Custom,
}

/// A single problem found while validating a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Reason code.
    pub code: IssueCode,
    /// Location of the offending value, from the root.
    pub path: Vec<PathSegment>,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    /// Creates an issue at the given path.
    pub fn new(code: IssueCode, path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            message: message.into(),
        }
    }

    /// Renders the path as `$.field[0].name`.
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut out = String::from("$");
        for segment in &self.path {
            out.push_str(&segment.to_string());
        }
        out
    }
}

/// Structured validation failure.
///
/// Serializes to `{"issues": [{"code": ..., "path": [...], "message": ...}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Every issue found, in discovery order. Never empty.
    pub issues: Vec<Issue>,
}

impl ValidationError {
    /// Creates an error from collected issues.
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// Creates an error with a single root-level issue.
    pub fn single(code: IssueCode, message: impl Into<String>) -> Self {
        Self::new(vec![Issue::new(code, Vec::new(), message)])
    }

    /// Returns the first issue.
    #[must_use]
    pub fn first(&self) -> Option<&Issue> {
        self.issues.first()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [] => write!(f, "validation failed"),
            [issue] => write!(f, "{} at '{}'", issue.message, issue.path_string()),
            [issue, rest @ ..] => write!(
                f,
                "{} at '{}' (and {} more)",
                issue.message,
                issue.path_string(),
                rest.len()
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
