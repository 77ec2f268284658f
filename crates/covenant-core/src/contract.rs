//! Route contracts.
//!
//! A [`RouteContract`] declares everything the dispatcher needs to know about
//! one route: its method and path template, and optional schemas for path
//! params, query, headers, body and each response status.
//!
//! # Example
//!
//! ```
//! use covenant_core::{ContractTree, Node, RouteContract, Schema};
//! use http::Method;
//!
//! let contract: ContractTree = Node::branch([
//!     (
//!         "getPost",
//!         Node::leaf(
//!             RouteContract::builder(Method::GET, "/posts/:id")
//!                 .summary("Get a post by id")
//!                 .response(200, Schema::object([("id", Schema::string().required())]))
//!                 .build(),
//!         ),
//!     ),
//!     (
//!         "createPost",
//!         Node::leaf(
//!             RouteContract::builder(Method::POST, "/posts")
//!                 .body(Schema::object([("title", Schema::string().required())]))
//!                 .build(),
//!         ),
//!     ),
//! ]);
//!
//! contract.check_routes().unwrap();
//! ```

use crate::error::ContractError;
use crate::tree::ContractTree;
use crate::validation::{SchemaRef, Validator};
use covenant_router::{PathTemplate, TemplateShape};
use http::{Method, StatusCode};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// The declaration of a single route.
#[derive(Debug, Clone)]
pub struct RouteContract {
    /// HTTP method.
    pub method: Method,
    /// Path template, e.g. `/posts/:id`.
    pub path: PathTemplate,
    /// Human-readable description.
    pub summary: Option<String>,
    /// Schema for the extracted path parameters.
    pub path_params: Option<SchemaRef>,
    /// Schema for the query object.
    pub query: Option<SchemaRef>,
    /// Schema for the header object.
    pub headers: Option<SchemaRef>,
    /// Schema for the JSON body.
    pub body: Option<SchemaRef>,
    /// Response schemas by status code.
    pub responses: IndexMap<u16, SchemaRef>,
}

impl RouteContract {
    /// Creates a builder for a route.
    #[must_use]
    pub fn builder(method: Method, path: &str) -> RouteContractBuilder {
        RouteContractBuilder::new(method, path)
    }

    /// Returns true if this route serves `method` on `path`.
    #[must_use]
    pub fn accepts(&self, method: &Method, path: &str) -> bool {
        self.method == *method && self.path.matches(path)
    }

    /// Returns the response schema declared for `status`.
    #[must_use]
    pub fn response_schema(&self, status: StatusCode) -> Option<&dyn Validator> {
        self.responses
            .get(&status.as_u16())
            .map(|schema| schema.as_ref())
    }
}

/// Builder for [`RouteContract`].
#[derive(Debug)]
pub struct RouteContractBuilder {
    contract: RouteContract,
}

impl RouteContractBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            contract: RouteContract {
                method,
                path: PathTemplate::parse(path),
                summary: None,
                path_params: None,
                query: None,
                headers: None,
                body: None,
                responses: IndexMap::new(),
            },
        }
    }

    /// Sets the summary.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.contract.summary = Some(summary.into());
        self
    }

    /// Sets the path-parameter schema.
    #[must_use]
    pub fn path_params(mut self, schema: impl Validator) -> Self {
        self.contract.path_params = Some(Arc::new(schema));
        self
    }

    /// Sets the query schema.
    #[must_use]
    pub fn query(mut self, schema: impl Validator) -> Self {
        self.contract.query = Some(Arc::new(schema));
        self
    }

    /// Sets the header schema.
    #[must_use]
    pub fn headers(mut self, schema: impl Validator) -> Self {
        self.contract.headers = Some(Arc::new(schema));
        self
    }

    /// Sets the body schema.
    #[must_use]
    pub fn body(mut self, schema: impl Validator) -> Self {
        self.contract.body = Some(Arc::new(schema));
        self
    }

    /// Declares the response schema for a status code.
    #[must_use]
    pub fn response(mut self, status: u16, schema: impl Validator) -> Self {
        self.contract.responses.insert(status, Arc::new(schema));
        self
    }

    /// Builds the contract.
    #[must_use]
    pub fn build(self) -> RouteContract {
        self.contract
    }
}

/// Methods that never carry a request body.
fn is_bodyless(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

impl ContractTree {
    /// Checks the route invariants of the whole tree.
    ///
    /// Fails if two routes share a method and template shape, or if a
    /// `GET`, `HEAD` or `OPTIONS` route declares a body schema.
    pub fn check_routes(&self) -> Result<(), ContractError> {
        let mut seen: HashMap<(Method, TemplateShape), (String, &RouteContract)> = HashMap::new();

        for (key, route) in self.leaves() {
            if route.body.is_some() && is_bodyless(&route.method) {
                return Err(ContractError::BodyOnSafeMethod {
                    method: route.method.clone(),
                    path: route.path.to_string(),
                    key,
                });
            }

            let slot = (route.method.clone(), route.path.shape());
            if let Some((existing_key, existing)) = seen.get(&slot) {
                return Err(ContractError::DuplicateRoute {
                    method: route.method.clone(),
                    path: route.path.to_string(),
                    key,
                    existing: existing.path.to_string(),
                    existing_key: existing_key.clone(),
                });
            }
            seen.insert(slot, (key, route));
        }
        Ok(())
    }

    /// Returns key pairs of routes whose templates overlap.
    ///
    /// Overlapping routes (e.g. `/posts/:id` and `/posts/new`) are legal,
    /// but the one declared first always wins.
    pub fn overlapping_routes(&self) -> Vec<(String, String)> {
        let leaves = self.leaves();
        let mut out = Vec::new();
        for (i, (key, route)) in leaves.iter().enumerate() {
            for (other_key, other) in &leaves[i + 1..] {
                if route.method == other.method && route.path.overlaps(&other.path) {
                    out.push((key.clone(), other_key.clone()));
                }
            }
        }
        out
    }
}
