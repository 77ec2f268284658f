//! Structured responses and response-schema enforcement.
//!
//! Handlers may return a [`RouteResponse`] (a status plus a JSON body)
//! instead of a raw HTTP response. [`shape_response`] runs the body through
//! the schema the contract declares for that status, so extra fields are
//! stripped and defaults filled before the response leaves the service.

use crate::contract::RouteContract;
use crate::types::{Response, ResponseExt};
use crate::validation::{check_schema, ValidateOptions, ValidationResult};
use http::StatusCode;
use serde_json::Value;

/// A status code with a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    /// Response status.
    pub status: StatusCode,
    /// JSON body.
    pub body: Value,
}

impl RouteResponse {
    /// Creates a structured response.
    #[must_use]
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// `200 OK` with the given body.
    #[must_use]
    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Serializes the body as a JSON HTTP response.
    pub fn into_response(self) -> serde_json::Result<Response> {
        Response::json(self.status, &self.body)
    }
}

/// Validates a structured response against the contract.
///
/// With `validate` disabled, or when the contract declares no schema for
/// the status, the response is returned unchanged.
///
/// # Example
///
/// ```
/// use covenant_core::{shape_response, RouteContract, RouteResponse, Schema};
/// use http::{Method, StatusCode};
/// use serde_json::json;
///
/// let contract = RouteContract::builder(Method::GET, "/posts/:id")
///     .response(200, Schema::object([("id", Schema::string().required())]))
///     .build();
///
/// let shaped = shape_response(
///     &contract,
///     RouteResponse::ok(json!({"id": "1", "secret": "hunter2"})),
///     true,
/// )
/// .unwrap();
/// assert_eq!(shaped.body, json!({"id": "1"}));
/// ```
pub fn shape_response(
    contract: &RouteContract,
    response: RouteResponse,
    validate: bool,
) -> ValidationResult<RouteResponse> {
    if !validate {
        return Ok(response);
    }

    let schema = contract.response_schema(response.status);
    let body = check_schema(response.body, schema, ValidateOptions::strict())?;
    Ok(RouteResponse {
        status: response.status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use crate::types::read_body;
    use http::Method;
    use serde_json::json;

    fn contract() -> RouteContract {
        RouteContract::builder(Method::POST, "/posts")
            .response(
                201,
                Schema::object([
                    ("id", Schema::string().required()),
                    ("published", Schema::boolean().default(false)),
                ]),
            )
            .build()
    }

    #[test]
    fn test_shape_strips_and_fills_defaults() {
        let shaped = shape_response(
            &contract(),
            RouteResponse::new(StatusCode::CREATED, json!({"id": "1", "internal": true})),
            true,
        )
        .unwrap();

        assert_eq!(shaped.status, StatusCode::CREATED);
        assert_eq!(shaped.body, json!({"id": "1", "published": false}));
    }

    #[test]
    fn test_shape_rejects_mismatch() {
        let err = shape_response(
            &contract(),
            RouteResponse::new(StatusCode::CREATED, json!({"title": "no id"})),
            true,
        )
        .unwrap_err();
        assert_eq!(err.issues[0].path_string(), "$.id");
    }

    #[test]
    fn test_undeclared_status_passes_through() {
        let response = RouteResponse::new(StatusCode::NOT_FOUND, json!({"anything": 1}));
        let shaped = shape_response(&contract(), response.clone(), true).unwrap();
        assert_eq!(shaped, response);
    }

    #[test]
    fn test_disabled_validation_passes_through() {
        let response = RouteResponse::new(StatusCode::CREATED, json!({"title": "no id"}));
        let shaped = shape_response(&contract(), response.clone(), false).unwrap();
        assert_eq!(shaped, response);
    }

    #[tokio::test]
    async fn test_into_response() {
        let response = RouteResponse::ok(json!([1, 2])).into_response().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_body(response.into_body()).await, "[1,2]");
    }
}
