//! Typed configuration for Covenant.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - `.env` files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → `.env` → env)
//!
//! # Example
//!
//! ```no_run
//! use covenant_config::{ConfigLoader, CovenantConfig};
//!
//! # fn main() -> Result<(), covenant_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("covenant.toml")?
//!     .with_env_prefix("COVENANT")
//!     .load()?;
//!
//! println!("Routes are served under: {:?}", config.dispatch.base_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [dispatch]
//! base_path = "/api"
//! json_query = false
//! response_validation = true
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! All configuration values can be overridden via environment variables using
//! the format `PREFIX__SECTION__KEY`. For example:
//!
//! - `COVENANT__DISPATCH__BASE_PATH=/api`
//! - `COVENANT__DISPATCH__RESPONSE_VALIDATION=true`
//! - `COVENANT__LOGGING__FORMAT=pretty`

#![doc(html_root_url = "https://docs.rs/covenant-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;

pub use config::{CovenantConfig, DispatchSection, LoggingSection};
pub use covenant_telemetry::LogFormat;
pub use error::ConfigError;
pub use loader::ConfigLoader;
