//! HTTP request and response types used by dispatchers and handlers.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use serde::Serialize;

/// The HTTP request type accepted by a dispatcher.
///
/// This is a standard `http::Request` with a `Full<Bytes>` body.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type produced by handlers and dispatchers.
///
/// This is a standard `http::Response` with a `Full<Bytes>` body.
pub type Response = http::Response<Full<Bytes>>;

/// Content type of JSON responses.
pub const APPLICATION_JSON: &str = "application/json";

/// Content type of plain-text responses.
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Extension trait for building common responses.
pub trait ResponseExt {
    /// Creates a plain-text response.
    fn text(status: StatusCode, body: impl Into<String>) -> Response;

    /// Creates a JSON response from an already-encoded body.
    fn json_bytes(status: StatusCode, body: impl Into<Bytes>) -> Response;

    /// Creates a JSON response from a serializable value.
    fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> serde_json::Result<Response>;

    /// `404 Not Found` with the body `Not Found`.
    fn not_found() -> Response;

    /// `500 Internal Server Error` with the body `Internal Server Error`.
    fn internal_error() -> Response;
}

impl ResponseExt for Response {
    fn text(status: StatusCode, body: impl Into<String>) -> Response {
        with_content_type(status, TEXT_PLAIN, Bytes::from(body.into()))
    }

    fn json_bytes(status: StatusCode, body: impl Into<Bytes>) -> Response {
        with_content_type(status, APPLICATION_JSON, body.into())
    }

    fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> serde_json::Result<Response> {
        Ok(Self::json_bytes(status, serde_json::to_vec(value)?))
    }

    fn not_found() -> Response {
        Self::text(StatusCode::NOT_FOUND, "Not Found")
    }

    fn internal_error() -> Response {
        Self::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

fn with_content_type(status: StatusCode, content_type: &'static str, body: Bytes) -> Response {
    let mut response = http::Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// Reads a complete `Full<Bytes>` body.
pub async fn read_body(body: Full<Bytes>) -> Bytes {
    match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_response() {
        let response = Response::text(StatusCode::BAD_REQUEST, "Invalid input");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), TEXT_PLAIN);
        assert_eq!(read_body(response.into_body()).await, "Invalid input");
    }

    #[tokio::test]
    async fn test_json_response() {
        let response =
            Response::json(StatusCode::CREATED, &serde_json::json!({"id": 1})).unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), APPLICATION_JSON);
        assert_eq!(read_body(response.into_body()).await, r#"{"id":1}"#);
    }

    #[tokio::test]
    async fn test_canned_responses() {
        let not_found = Response::not_found();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_body(not_found.into_body()).await, "Not Found");

        let internal = Response::internal_error();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_body(internal.into_body()).await, "Internal Server Error");
    }
}
