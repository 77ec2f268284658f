//! # Covenant Core
//!
//! Core types for contract-driven request dispatch.
//!
//! This crate provides the foundational types used throughout Covenant:
//!
//! - [`RouteContract`] - Declaration of one route: method, path template and schemas
//! - [`Node`] - Keyed route trees ([`ContractTree`], [`ImplementationTree`], [`MergedTree`])
//! - [`merge`] / [`resolve`] - Contract/implementation pairing and route lookup
//! - [`Validator`] - Schema seam, with the bundled [`Schema`] engine
//! - [`RouteHandler`] - Type-erased async handler receiving a [`ValidatedRequest`]
//! - [`DispatchError`] / [`ContractError`] - Standard error types

#![doc(html_root_url = "https://docs.rs/covenant-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod contract;
mod error;
mod handler;
pub mod resolve;
pub mod response;
pub mod schema;
pub mod tree;
mod types;
pub mod validation;

pub use contract::{RouteContract, RouteContractBuilder};
pub use error::{
    ContractError, DispatchError, DispatchResult, StageError, ValidationStage,
};
pub use handler::{
    handler, BoxFuture, HandlerResult, RequestBody, RequestHead, RouteHandler, ValidatedRequest,
};
pub use resolve::{resolve, resolve_with_key};
pub use response::{shape_response, RouteResponse};
pub use schema::{Schema, SchemaKind, UnknownKeys};
pub use tree::{merge, ContractTree, ImplementationTree, MergedRoute, MergedTree, Node};
pub use types::{read_body, Request, Response, ResponseExt, APPLICATION_JSON, TEXT_PLAIN};
pub use validation::{
    check_schema, Issue, IssueCode, PathSegment, SchemaRef, ValidateOptions, ValidationError,
    ValidationResult, Validator,
};
