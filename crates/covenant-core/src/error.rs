//! Error types for Covenant.
//!
//! Two families of errors exist:
//!
//! - [`ContractError`]: defects in the contract or implementation trees,
//!   reported once when a dispatcher is built
//! - [`DispatchError`]: per-request failures
//!
//! Only [`DispatchError::Handler`] and [`DispatchError::ResponseSchemaMismatch`]
//! ever reach the caller of a dispatcher; the other kinds are answered with
//! a 404 or 400 response.

use crate::validation::ValidationError;
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using [`DispatchError`].
pub type DispatchResult<T> = Result<T, DispatchError>;

/// The request part being validated.
///
/// Stages run in declaration order; the first failing stage stops the
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStage {
    /// Placeholder values extracted from the path.
    PathParams,
    /// Query-string values.
    Query,
    /// JSON request body.
    Body,
    /// Request headers.
    Headers,
}

impl ValidationStage {
    /// All stages in the order they run.
    pub const ORDER: [Self; 4] = [Self::PathParams, Self::Query, Self::Body, Self::Headers];

    /// Returns the stage name as used in error bodies, logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PathParams => "path_params",
            Self::Query => "query",
            Self::Body => "body",
            Self::Headers => "headers",
        }
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation failure tagged with the stage that produced it.
///
/// Serializes to the 400 response body:
/// `{"stage": "body", "issues": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{stage} validation failed: {error}")]
pub struct StageError {
    /// Stage that failed.
    pub stage: ValidationStage,
    /// Issues reported by the schema.
    #[serde(flatten)]
    pub error: ValidationError,
}

impl StageError {
    /// Creates a new stage error.
    #[must_use]
    pub fn new(stage: ValidationStage, error: ValidationError) -> Self {
        Self { stage, error }
    }
}

/// Construction-time defects in a contract or implementation tree.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Two routes share a method and template shape.
    #[error("duplicate route {method} {path} at '{key}' (already declared by {existing} at '{existing_key}')")]
    DuplicateRoute {
        /// HTTP method of both routes.
        method: Method,
        /// Template of the later route.
        path: String,
        /// Key path of the later route.
        key: String,
        /// Template of the earlier route.
        existing: String,
        /// Key path of the earlier route.
        existing_key: String,
    },

    /// A route that cannot carry a body declares a body schema.
    #[error("route {method} {path} at '{key}' declares a body schema")]
    BodyOnSafeMethod {
        /// HTTP method of the route.
        method: Method,
        /// Template of the route.
        path: String,
        /// Key path of the route.
        key: String,
    },

    /// The implementation tree has no entry for a contract key.
    #[error("missing implementation for '{path}'")]
    MissingImplementation {
        /// Dotted key path of the contract entry.
        path: String,
    },

    /// A contract leaf is paired with an implementation branch or vice versa.
    #[error("shape mismatch at '{path}': contract has a {expected}, implementation has a {found}")]
    ShapeMismatch {
        /// Dotted key path.
        path: String,
        /// Node kind in the contract tree.
        expected: &'static str,
        /// Node kind in the implementation tree.
        found: &'static str,
    },
}

/// Per-request dispatch failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No route matches the method and path.
    #[error("no route for {method} {path}")]
    RouteNotFound {
        /// Request method.
        method: Method,
        /// Request path (after base-path stripping).
        path: String,
    },

    /// A request part failed its schema.
    #[error(transparent)]
    Validation(#[from] StageError),

    /// The handler returned an error.
    #[error("handler failed: {0}")]
    Handler(#[source] anyhow::Error),

    /// The handler's response body does not match the declared schema.
    #[error("response body for status {status} does not match its schema: {error}")]
    ResponseSchemaMismatch {
        /// Response status.
        status: StatusCode,
        /// Issues reported by the response schema.
        error: ValidationError,
    },
}

impl DispatchError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Handler(_) | Self::ResponseSchemaMismatch { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns a stable name for this error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RouteNotFound { .. } => "route_not_found",
            Self::Validation(StageError { stage, .. }) => match stage {
                ValidationStage::PathParams => "path_params_invalid",
                ValidationStage::Query => "query_invalid",
                ValidationStage::Body => "body_invalid",
                ValidationStage::Headers => "headers_invalid",
            },
            Self::Handler(_) => "handler_failed",
            Self::ResponseSchemaMismatch { .. } => "response_schema_mismatch",
        }
    }

    /// Returns the failing stage for validation errors.
    #[must_use]
    pub const fn stage(&self) -> Option<ValidationStage> {
        match self {
            Self::Validation(err) => Some(err.stage),
            _ => None,
        }
    }

    /// Returns true if the error is the client's fault (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::IssueCode;
    use serde_json::json;

    fn stage_error(stage: ValidationStage) -> StageError {
        StageError::new(stage, ValidationError::single(IssueCode::Required, "Required"))
    }

    #[test]
    fn test_stage_order_and_names() {
        let names: Vec<_> = ValidationStage::ORDER.iter().map(ValidationStage::as_str).collect();
        assert_eq!(names, vec!["path_params", "query", "body", "headers"]);
        assert_eq!(ValidationStage::Body.to_string(), "body");
    }

    #[test]
    fn test_stage_error_serialization() {
        let json = serde_json::to_value(stage_error(ValidationStage::Body)).unwrap();
        assert_eq!(
            json,
            json!({
                "stage": "body",
                "issues": [{"code": "required", "path": [], "message": "Required"}]
            })
        );
    }

    #[test]
    fn test_status_codes() {
        let not_found = DispatchError::RouteNotFound {
            method: Method::GET,
            path: "/nope".into(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert!(not_found.is_client_error());

        let invalid = DispatchError::from(stage_error(ValidationStage::Query));
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.stage(), Some(ValidationStage::Query));

        let handler = DispatchError::Handler(anyhow::anyhow!("boom"));
        assert_eq!(handler.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!handler.is_client_error());
        assert_eq!(handler.stage(), None);
    }

    #[test]
    fn test_kinds() {
        let kinds: Vec<_> = ValidationStage::ORDER
            .into_iter()
            .map(|stage| DispatchError::from(stage_error(stage)).kind())
            .collect();
        assert_eq!(
            kinds,
            vec!["path_params_invalid", "query_invalid", "body_invalid", "headers_invalid"]
        );

        let mismatch = DispatchError::ResponseSchemaMismatch {
            status: StatusCode::OK,
            error: ValidationError::single(IssueCode::InvalidType, "expected object"),
        };
        assert_eq!(mismatch.kind(), "response_schema_mismatch");
    }

    #[test]
    fn test_contract_error_display() {
        let err = ContractError::MissingImplementation {
            path: "posts.getPost".into(),
        };
        assert_eq!(err.to_string(), "missing implementation for 'posts.getPost'");

        let err = ContractError::ShapeMismatch {
            path: "posts".into(),
            expected: "branch",
            found: "leaf",
        };
        assert!(err.to_string().contains("contract has a branch"));
    }
}
