//! Request validation stages.
//!
//! Path params, query, body and headers are validated in that fixed order.
//! The first failing stage ends the request; later stages never run, and the
//! body is not read when an earlier stage fails.

use bytes::Bytes;
use covenant_core::{
    read_body, IssueCode, RequestBody, RequestHead, RouteContract, StageError, ValidateOptions,
    ValidatedRequest, ValidationError, ValidationStage, Validator,
};
use covenant_extract::{normalize_headers, normalize_query, params_to_map, parse_body, QueryMode};
use http_body_util::Full;
use serde_json::Value;

/// Runs every stage for a resolved route.
///
/// `path` is the request path with the base path already stripped.
pub(crate) async fn validate_request(
    contract: &RouteContract,
    head: RequestHead,
    path: &str,
    body: Full<Bytes>,
    query_mode: QueryMode,
) -> Result<ValidatedRequest, StageError> {
    let raw_params = params_to_map(&contract.path.extract_params(path));
    let params = run_stage(
        ValidationStage::PathParams,
        Value::Object(raw_params),
        contract.path_params.as_deref(),
        ValidateOptions::pass_through(),
    )?;

    let raw_query = normalize_query(head.uri.query(), query_mode).map_err(|err| {
        StageError::new(
            ValidationStage::Query,
            ValidationError::single(IssueCode::InvalidType, err.to_string()),
        )
    })?;
    let query = run_stage(
        ValidationStage::Query,
        Value::Object(raw_query),
        contract.query.as_deref(),
        ValidateOptions::strict(),
    )?;

    let body = match parse_body(read_body(body).await) {
        RequestBody::Json(value) => RequestBody::Json(run_stage(
            ValidationStage::Body,
            value,
            contract.body.as_deref(),
            ValidateOptions::strict(),
        )?),
        raw @ RequestBody::Raw(_) => {
            tracing::debug!("body is not JSON; passing it through unvalidated");
            raw
        }
    };

    let headers = run_stage(
        ValidationStage::Headers,
        Value::Object(normalize_headers(&head.headers)),
        contract.headers.as_deref(),
        ValidateOptions::pass_through(),
    )?;

    Ok(ValidatedRequest {
        body,
        query,
        params,
        headers,
        req: head,
    })
}

fn run_stage(
    stage: ValidationStage,
    value: Value,
    schema: Option<&dyn Validator>,
    options: ValidateOptions,
) -> Result<Value, StageError> {
    let result = covenant_core::check_schema(value, schema, options);
    tracing::debug!(stage = stage.as_str(), passed = result.is_ok(), "validation stage");
    result.map_err(|error| StageError::new(stage, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use covenant_core::Schema;
    use http::Method;
    use serde_json::json;

    fn head(uri: &str) -> RequestHead {
        let request = http::Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("X-Api-Key", "secret")
            .header("User-Agent", "tests")
            .body(())
            .unwrap();
        let (parts, ()) = request.into_parts();
        RequestHead::from_parts(&parts)
    }

    fn body(raw: &'static str) -> Full<Bytes> {
        Full::new(Bytes::from_static(raw.as_bytes()))
    }

    fn contract() -> RouteContract {
        RouteContract::builder(Method::POST, "/posts/:id/comments")
            .path_params(Schema::object([("id", Schema::integer().coerce().required())]))
            .query(Schema::object([("notify", Schema::boolean().coerce().default(false))]))
            .body(Schema::object([("text", Schema::string().required())]))
            .headers(Schema::object([("x-api-key", Schema::string().required())]))
            .build()
    }

    #[tokio::test]
    async fn test_all_stages_pass() {
        let validated = validate_request(
            &contract(),
            head("/posts/7/comments?notify=true"),
            "/posts/7/comments",
            body(r#"{"text": "hi"}"#),
            QueryMode::Plain,
        )
        .await
        .unwrap();

        assert_eq!(validated.params, json!({"id": 7}));
        assert_eq!(validated.query, json!({"notify": true}));
        assert_eq!(validated.body, RequestBody::Json(json!({"text": "hi"})));
        assert_eq!(validated.header("x-api-key"), Some("secret"));
        assert_eq!(validated.header("user-agent"), Some("tests"));
    }

    #[tokio::test]
    async fn test_first_failing_stage_wins() {
        let err = validate_request(
            &contract(),
            head("/posts/abc/comments?notify=maybe"),
            "/posts/abc/comments",
            body("{}"),
            QueryMode::Plain,
        )
        .await
        .unwrap_err();
        assert_eq!(err.stage, ValidationStage::PathParams);

        let err = validate_request(
            &contract(),
            head("/posts/1/comments?notify=maybe"),
            "/posts/1/comments",
            body("{}"),
            QueryMode::Plain,
        )
        .await
        .unwrap_err();
        assert_eq!(err.stage, ValidationStage::Query);
    }

    #[tokio::test]
    async fn test_query_drops_undeclared_keys() {
        let validated = validate_request(
            &contract(),
            head("/posts/1/comments?unexpected=1"),
            "/posts/1/comments",
            body(r#"{"text": "hi"}"#),
            QueryMode::Plain,
        )
        .await
        .unwrap();
        assert_eq!(validated.query, json!({"notify": false}));
    }

    #[tokio::test]
    async fn test_raw_body_skips_body_schema() {
        let validated = validate_request(
            &contract(),
            head("/posts/1/comments"),
            "/posts/1/comments",
            body("plain text"),
            QueryMode::Plain,
        )
        .await
        .unwrap();
        assert_eq!(
            validated.body,
            RequestBody::Raw(Bytes::from_static(b"plain text"))
        );
    }

    #[tokio::test]
    async fn test_missing_header() {
        let request = http::Request::builder()
            .uri("/posts/1/comments")
            .body(())
            .unwrap();
        let (parts, ()) = request.into_parts();

        let err = validate_request(
            &contract(),
            RequestHead::from_parts(&parts),
            "/posts/1/comments",
            body(r#"{"text": "hi"}"#),
            QueryMode::Plain,
        )
        .await
        .unwrap_err();
        assert_eq!(err.stage, ValidationStage::Headers);
        assert_eq!(err.error.issues[0].path_string(), "$.x-api-key");
    }

    #[tokio::test]
    async fn test_no_schemas_accept_everything() {
        let contract = RouteContract::builder(Method::GET, "/anything/:id").build();
        let validated = validate_request(
            &contract,
            head("/anything/1?take=5"),
            "/anything/1",
            body(""),
            QueryMode::Json,
        )
        .await
        .unwrap();

        assert_eq!(validated.params, json!({"id": "1"}));
        assert_eq!(validated.query, json!({"take": 5}));
        assert!(validated.body.as_raw().unwrap().is_empty());
    }
}
