//! # Covenant
//!
//! **Contract-first request dispatch for `http` services**
//!
//! Covenant pairs a declarative contract tree (methods, path templates and
//! schemas) with a tree of handlers of the same shape, and dispatches
//! requests through a fixed validation sequence:
//!
//! - Routes resolve in declaration order after the base path is stripped
//! - Path params, query, body and headers are validated before the handler runs
//! - Failed stages are answered with `400` and `{"stage", "issues"}`
//! - Responses can be checked and reshaped against their declared schemas
//!
//! ## Quick Start
//!
//! ```rust
//! use covenant::prelude::*;
//! use serde_json::json;
//!
//! let contract: ContractTree = Node::branch([(
//!     "posts",
//!     Node::branch([
//!         (
//!             "getPost",
//!             Node::leaf(RouteContract::builder(Method::GET, "/posts/:id").build()),
//!         ),
//!         (
//!             "createPost",
//!             Node::leaf(
//!                 RouteContract::builder(Method::POST, "/posts")
//!                     .body(Schema::object([("title", Schema::string().required())]))
//!                     .response(201, Schema::object([("id", Schema::string().required())]))
//!                     .build(),
//!             ),
//!         ),
//!     ]),
//! )]);
//!
//! let implementation: ImplementationTree = Node::branch([(
//!     "posts",
//!     Node::branch([
//!         (
//!             "getPost",
//!             Node::leaf(handler(|req| async move {
//!                 Ok(Response::json(StatusCode::OK, &json!({"id": req.param("id")}))?)
//!             })),
//!         ),
//!         (
//!             "createPost",
//!             Node::leaf(RouteHandler::structured(|_req| async move {
//!                 Ok(RouteResponse::new(StatusCode::CREATED, json!({"id": "1"})))
//!             })),
//!         ),
//!     ]),
//! )]);
//!
//! let options = DispatchOptions::builder().response_validation(true).build();
//! let dispatcher = Dispatcher::new(&contract, &implementation, options).unwrap();
//! assert_eq!(dispatcher.routes().len(), 2);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Request → base path → resolve → path params → query → body → headers
//!                                                                  ↓
//! Response ← response validation ←─────────────────────────── handler
//! ```

#![doc(html_root_url = "https://docs.rs/covenant/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use covenant_core as core;

// Re-export dispatch types
pub use covenant_dispatch as dispatch;

// Re-export router types
pub use covenant_router as router;

// Re-export extraction types
pub use covenant_extract as extract;

// Re-export configuration types
pub use covenant_config as config;

// Re-export telemetry types
pub use covenant_telemetry as telemetry;

use covenant_config::{ConfigError, ConfigLoader, CovenantConfig};
use covenant_core::{ContractError, ContractTree, ImplementationTree};
use covenant_dispatch::{DispatchOptions, Dispatcher};

/// Environment prefix used by [`load_config`].
pub const ENV_PREFIX: &str = "COVENANT";

/// Loads configuration with the standard layering.
///
/// Defaults, then `path` (if it exists), then `.env`, then `COVENANT__*`
/// environment variables.
pub fn load_config(path: &str) -> Result<CovenantConfig, ConfigError> {
    ConfigLoader::new()
        .with_defaults()
        .with_optional_file(path)?
        .with_dotenv()?
        .with_env_prefix(ENV_PREFIX)
        .load()
}

/// Builds a dispatcher from the `[dispatch]` section of `config`.
pub fn dispatcher_from_config(
    contract: &ContractTree,
    implementation: &ImplementationTree,
    config: &CovenantConfig,
) -> Result<Dispatcher, ContractError> {
    Dispatcher::new(
        contract,
        implementation,
        DispatchOptions::from_config(&config.dispatch),
    )
}

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use covenant::prelude::*;
/// ```
pub mod prelude {
    pub use covenant_core::{
        handler, ContractTree, DispatchError, ImplementationTree, Node, Request, RequestBody,
        Response, ResponseExt, RouteContract, RouteHandler, RouteResponse, Schema,
        ValidatedRequest,
    };

    pub use covenant_dispatch::{handle_request, DispatchOptions, Dispatcher};

    pub use covenant_config::{ConfigLoader, CovenantConfig};

    pub use covenant_telemetry::{init_logging, LogConfig, LogFormat};

    pub use http::{Method, StatusCode};
}
