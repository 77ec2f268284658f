//! # Covenant Dispatch
//!
//! Contract-checked request dispatch.
//!
//! A [`Dispatcher`] pairs a contract tree with an implementation tree and
//! turns `http` requests into responses:
//!
//! - Routes are resolved in declaration order after stripping the base path
//! - Path params, query, body and headers are validated before any handler runs
//! - Invalid requests are answered with `400` and a structured error body
//! - Handler responses can be validated against the declared response schemas
//!
//! ## Example
//!
//! ```rust
//! use covenant_core::{handler, Node, Response, ResponseExt, RouteContract, Schema};
//! use covenant_dispatch::{DispatchOptions, Dispatcher};
//! use bytes::Bytes;
//! use http::{Method, StatusCode};
//! use http_body_util::Full;
//!
//! # tokio_test::block_on(async {
//! let contract = Node::branch([(
//!     "getPost",
//!     Node::leaf(
//!         RouteContract::builder(Method::GET, "/posts/:id")
//!             .path_params(Schema::object([("id", Schema::integer().coerce().required())]))
//!             .build(),
//!     ),
//! )]);
//! let implementation = Node::branch([(
//!     "getPost",
//!     Node::leaf(handler(|req| async move {
//!         Ok(Response::json(StatusCode::OK, &req.params)?)
//!     })),
//! )]);
//!
//! let options = DispatchOptions::builder().base_path("/api").build();
//! let dispatcher = Dispatcher::new(&contract, &implementation, options).unwrap();
//!
//! let request = http::Request::builder()
//!     .uri("/api/posts/abc")
//!     .body(Full::new(Bytes::new()))
//!     .unwrap();
//! let response = dispatcher.dispatch(request).await.unwrap();
//! assert_eq!(response.status(), StatusCode::BAD_REQUEST);
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/covenant-dispatch/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dispatcher;
mod error;
mod options;
mod stages;

pub use dispatcher::{handle_request, strip_base_path, Dispatcher};
pub use error::HandleError;
pub use options::{DispatchOptions, DispatchOptionsBuilder, ErrorHandler};
