//! The request dispatcher.
//!
//! A [`Dispatcher`] owns a merged route tree and runs every request through
//! the same sequence:
//!
//! ```text
//! strip base path → resolve → path params → query → body → headers
//!     → handler → response validation → response
//! ```
//!
//! Unmatched routes are answered with `404 Not Found` and failed stages with
//! `400 Bad Request` carrying `{"stage": ..., "issues": [...]}`. Handler
//! failures either go to the configured error handler (and become a `500`)
//! or are returned to the caller.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use covenant_core::{
    check_schema, merge, read_body, resolve_with_key, ContractError, ContractTree, DispatchError,
    DispatchResult, ImplementationTree, MergedTree, Request, RequestHead, Response, ResponseExt,
    RouteContract, StageError, ValidateOptions,
};
use covenant_telemetry::metrics::{self, outcome, InFlightGuard};
use http::header::CONTENT_LENGTH;
use http::{Method, StatusCode};
use http_body_util::Full;
use serde_json::Value;
use tracing::Instrument;

use crate::error::HandleError;
use crate::options::DispatchOptions;
use crate::stages::validate_request;

/// Dispatches requests to the handlers of a contract.
///
/// Cloning is cheap: the merged route tree is shared.
///
/// # Example
///
/// ```rust
/// use covenant_core::{handler, Node, RouteContract, Response, ResponseExt};
/// use covenant_dispatch::{DispatchOptions, Dispatcher};
/// use http::{Method, StatusCode};
///
/// let contract = Node::branch([(
///     "health",
///     Node::leaf(RouteContract::builder(Method::GET, "/health").build()),
/// )]);
/// let implementation = Node::branch([(
///     "health",
///     Node::leaf(handler(|_req| async { Ok(Response::text(StatusCode::OK, "ok")) })),
/// )]);
///
/// let dispatcher = Dispatcher::new(&contract, &implementation, DispatchOptions::default()).unwrap();
/// assert_eq!(dispatcher.routes(), vec![(Method::GET, "/health".to_string())]);
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Arc<MergedTree>,
    options: DispatchOptions,
}

impl Dispatcher {
    /// Checks the contract, pairs it with the implementation and builds a
    /// dispatcher.
    ///
    /// Overlapping templates (such as `/posts/:id` and `/posts/new`) are
    /// accepted with a warning; the route declared first always wins.
    pub fn new(
        contract: &ContractTree,
        implementation: &ImplementationTree,
        options: DispatchOptions,
    ) -> Result<Self, ContractError> {
        contract.check_routes()?;

        for (first, shadowed) in contract.overlapping_routes() {
            tracing::warn!(
                route = %first,
                shadowed = %shadowed,
                "overlapping route templates, the first declared route wins"
            );
        }

        let routes = merge(contract, implementation)?;
        tracing::debug!(routes = routes.leaves().len(), "dispatcher ready");

        Ok(Self {
            routes: Arc::new(routes),
            options,
        })
    }

    /// Returns the options this dispatcher was built with.
    #[must_use]
    pub fn options(&self) -> &DispatchOptions {
        &self.options
    }

    /// Lists `(method, template)` for every route in declaration order.
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String)> {
        self.routes
            .leaves()
            .into_iter()
            .map(|(_, route)| (route.contract.method.clone(), route.contract.path.to_string()))
            .collect()
    }

    /// Dispatches one request.
    ///
    /// Returns `Ok` for every handled, rejected or unmatched request. `Err`
    /// is only returned for handler failures and response schema
    /// mismatches, and only when no error handler is configured.
    pub async fn dispatch(&self, request: Request) -> DispatchResult<Response> {
        let span = tracing::info_span!(
            "dispatch",
            http.method = %request.method(),
            http.path = %request.uri().path(),
        );

        async move {
            let _in_flight = InFlightGuard::new();
            let started = Instant::now();

            let (label, result) = self.run(request).await;

            let elapsed = started.elapsed();
            let status = result.as_ref().map_or(500, |response| response.status().as_u16());
            metrics::record_request(label, elapsed);
            tracing::debug!(
                outcome = label,
                http.status_code = status,
                duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "request dispatched"
            );
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: Request) -> (&'static str, DispatchResult<Response>) {
        let (parts, body) = request.into_parts();
        let head = RequestHead::from_parts(&parts);

        let Some(path) = strip_base_path(parts.uri.path(), self.options.base_path()) else {
            tracing::debug!(base_path = self.options.base_path(), "path outside base path");
            return (outcome::NOT_FOUND, Ok(Response::not_found()));
        };

        let Some((key, route)) = resolve_with_key(&self.routes, path, &parts.method) else {
            tracing::debug!("no matching route");
            return (outcome::NOT_FOUND, Ok(Response::not_found()));
        };
        tracing::debug!(route = %key, template = %route.contract.path, "route resolved");

        let query_mode = self.options.query_mode();
        let validated =
            match validate_request(&route.contract, head.clone(), path, body, query_mode).await {
                Ok(validated) => validated,
                Err(err) => {
                    tracing::warn!(
                        route = %key,
                        stage = %err.stage,
                        error = %err.error,
                        "request rejected"
                    );
                    metrics::record_validation_failure(err.stage.as_str());
                    return (outcome::INVALID, Ok(bad_request(&err)));
                }
            };

        let result = match route.handler.call(validated).await {
            Ok(response) => self.check_response(&route.contract, response).await,
            Err(err) => Err(DispatchError::Handler(err)),
        };

        match result {
            Ok(response) => (outcome::HANDLED, Ok(response)),
            Err(err) => {
                tracing::error!(route = %key, kind = err.kind(), error = %err, "request failed");
                (outcome::FAILED, self.report(err, &head))
            }
        }
    }

    /// Validates a JSON response body against the schema declared for its
    /// status, rebuilding the body from the validated value.
    async fn check_response(
        &self,
        contract: &RouteContract,
        response: Response,
    ) -> DispatchResult<Response> {
        if !self.options.response_validation() {
            return Ok(response);
        }
        let Some(schema) = contract.response_schema(response.status()) else {
            return Ok(response);
        };

        let (mut parts, body) = response.into_parts();
        let bytes = read_body(body).await;
        let Ok(value) = serde_json::from_slice::<Value>(&bytes) else {
            return Ok(Response::from_parts(parts, Full::new(bytes)));
        };

        let validated = check_schema(value, Some(schema), ValidateOptions::strict())
            .map_err(|error| DispatchError::ResponseSchemaMismatch {
                status: parts.status,
                error,
            })?;
        let encoded = serde_json::to_vec(&validated)
            .map_err(|err| DispatchError::Handler(err.into()))?;

        parts.headers.remove(CONTENT_LENGTH);
        Ok(Response::from_parts(parts, Full::new(Bytes::from(encoded))))
    }

    fn report(&self, err: DispatchError, head: &RequestHead) -> DispatchResult<Response> {
        match self.options.error_handler() {
            Some(on_error) => {
                on_error(&err, head);
                Ok(Response::internal_error())
            }
            None => Err(err),
        }
    }
}

/// Removes `base_path` from the front of `path`.
///
/// Returns `None` if `path` lies outside the base path. The prefix must end
/// at a segment boundary, so `/api` does not match `/apis`.
pub fn strip_base_path<'a>(path: &'a str, base_path: &str) -> Option<&'a str> {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        return Some(path);
    }
    match path.strip_prefix(base)? {
        "" => Some("/"),
        rest if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}

fn bad_request(err: &StageError) -> Response {
    Response::json(StatusCode::BAD_REQUEST, err)
        .unwrap_or_else(|_| Response::text(StatusCode::BAD_REQUEST, err.to_string()))
}

/// Merges `contract` with `implementation` and dispatches a single request.
///
/// Equivalent to building a [`Dispatcher`] with `base_path` and calling
/// [`Dispatcher::dispatch`] once. Prefer a long-lived [`Dispatcher`] when
/// serving more than one request.
pub async fn handle_request(
    contract: &ContractTree,
    implementation: &ImplementationTree,
    request: Request,
    base_path: &str,
    options: DispatchOptions,
) -> Result<Response, HandleError> {
    let dispatcher = Dispatcher::new(contract, implementation, options.with_base_path(base_path))?;
    Ok(dispatcher.dispatch(request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_base_path() {
        assert_eq!(strip_base_path("/posts", ""), Some("/posts"));
        assert_eq!(strip_base_path("/posts", "/"), Some("/posts"));
        assert_eq!(strip_base_path("/api/posts", "/api"), Some("/posts"));
        assert_eq!(strip_base_path("/api/posts", "/api/"), Some("/posts"));
        assert_eq!(strip_base_path("/api", "/api"), Some("/"));
        assert_eq!(strip_base_path("/apis/posts", "/api"), None);
        assert_eq!(strip_base_path("/posts", "/api"), None);
    }

    #[test]
    fn test_dispatcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Dispatcher>();
    }
}
