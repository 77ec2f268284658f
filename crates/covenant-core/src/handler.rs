//! Route handlers and the validated request they receive.
//!
//! Every handler has the same canonical shape:
//!
//! ```text
//! Fn(ValidatedRequest) -> impl Future<Output = anyhow::Result<Response>>
//! ```
//!
//! The dispatcher only invokes a handler after path params, query, body and
//! headers passed their schemas, so the values in [`ValidatedRequest`] are
//! already parsed (defaults filled in, coercions applied).
//!
//! # Example
//!
//! ```rust
//! use covenant_core::{handler, Response, ResponseExt};
//! use http::StatusCode;
//! use serde_json::json;
//!
//! let get_post = handler(|req| async move {
//!     let id = req.param("id").unwrap_or_default().to_string();
//!     Ok(Response::json(StatusCode::OK, &json!({"id": id}))?)
//! });
//! # let _ = get_post;
//! ```

use crate::response::RouteResponse;
use crate::types::Response;
use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by type-erased handlers.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Result produced by a handler.
pub type HandlerResult = anyhow::Result<Response>;

type ErasedHandler = Arc<dyn Fn(ValidatedRequest) -> BoxFuture<HandlerResult> + Send + Sync>;

/// A type-erased, cheaply cloneable route handler.
#[derive(Clone)]
pub struct RouteHandler {
    inner: ErasedHandler,
}

impl RouteHandler {
    /// Wraps an async function as a handler.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(ValidatedRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |req| Box::pin(f(req))),
        }
    }

    /// Wraps an async function producing a structured [`RouteResponse`].
    ///
    /// The response is serialized as JSON with its declared status.
    pub fn structured<F, Fut>(f: F) -> Self
    where
        F: Fn(ValidatedRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<RouteResponse>> + Send + 'static,
    {
        Self::new(move |req| {
            let fut = f(req);
            async move { Ok(fut.await?.into_response()?) }
        })
    }

    /// Invokes the handler.
    pub fn call(&self, req: ValidatedRequest) -> BoxFuture<HandlerResult> {
        (self.inner)(req)
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandler").finish_non_exhaustive()
    }
}

/// Shorthand for [`RouteHandler::new`].
pub fn handler<F, Fut>(f: F) -> RouteHandler
where
    F: Fn(ValidatedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    RouteHandler::new(f)
}

/// The request body as seen by a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// The body parsed as JSON and passed its schema (if any).
    Json(Value),
    /// The body was not valid JSON (including an empty body). Passed through
    /// unvalidated.
    Raw(Bytes),
}

impl RequestBody {
    /// Returns the JSON value, if the body was JSON.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Returns the raw bytes, if the body was not JSON.
    #[must_use]
    pub fn as_raw(&self) -> Option<&Bytes> {
        match self {
            Self::Json(_) => None,
            Self::Raw(bytes) => Some(bytes),
        }
    }

    /// Deserializes the JSON body into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value.clone())?),
            Self::Raw(_) => anyhow::bail!("request body is not JSON"),
        }
    }
}

/// Method, URI and headers of the original request.
#[derive(Debug, Clone)]
pub struct RequestHead {
    /// Request method.
    pub method: Method,
    /// Full request URI, including the base path and query.
    pub uri: Uri,
    /// Original headers.
    pub headers: HeaderMap,
}

impl RequestHead {
    /// Captures the head of an `http` request.
    #[must_use]
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
        }
    }

    /// Returns the request path, including any base path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }
}

/// Everything a handler receives.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    /// Request body.
    pub body: RequestBody,
    /// Validated query object.
    pub query: Value,
    /// Validated path-parameter object.
    pub params: Value,
    /// Validated header object (lower-cased names).
    pub headers: Value,
    /// Head of the original request.
    pub req: RequestHead,
}

impl ValidatedRequest {
    /// Returns a path parameter as a string.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    /// Returns a header value as a string. `name` must be lower-case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(Value::as_str)
    }

    /// Deserializes the validated query into `T`.
    pub fn query_as<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_value(self.query.clone())?)
    }

    /// Deserializes the validated path parameters into `T`.
    pub fn params_as<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_value(self.params.clone())?)
    }
}
