//! Logging and metrics for Covenant.
//!
//! - **Logging**: [`init_logging`] installs a `tracing-subscriber` registry
//!   with JSON or pretty output and an `EnvFilter`. Standard field names
//!   live in [`logging::fields`].
//! - **Metrics**: metric names and recording helpers in [`metrics`], on
//!   top of the `metrics` facade.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `covenant_requests_total` | Counter | `outcome` | Dispatched requests |
//! | `covenant_request_duration_seconds` | Histogram | `outcome` | Dispatch latency |
//! | `covenant_validation_failures_total` | Counter | `stage` | Rejected request parts |
//! | `covenant_in_flight_requests` | Gauge | - | Requests being dispatched |

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{fields, init_logging, LogConfig, LogFormat};
pub use metrics::describe_metrics;

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
