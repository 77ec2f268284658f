//! Dispatcher metrics.
//!
//! Metrics are recorded through the `metrics` facade; without an installed
//! recorder every call is a no-op. Applications pick their own exporter.
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `covenant_requests_total` | Counter | `outcome` | Dispatched requests |
//! | `covenant_request_duration_seconds` | Histogram | `outcome` | Dispatch latency |
//! | `covenant_validation_failures_total` | Counter | `stage` | Rejected request parts |
//! | `covenant_in_flight_requests` | Gauge | - | Requests being dispatched |

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Counter of dispatched requests.
pub const REQUESTS_TOTAL: &str = "covenant_requests_total";

/// Histogram of dispatch latency.
pub const REQUEST_DURATION_SECONDS: &str = "covenant_request_duration_seconds";

/// Counter of validation failures.
pub const VALIDATION_FAILURES_TOTAL: &str = "covenant_validation_failures_total";

/// Gauge of in-flight requests.
pub const IN_FLIGHT_REQUESTS: &str = "covenant_in_flight_requests";

/// Outcome label values for [`REQUESTS_TOTAL`].
pub mod outcome {
    /// The handler produced the response.
    pub const HANDLED: &str = "handled";
    /// No route matched.
    pub const NOT_FOUND: &str = "not_found";
    /// A request part failed validation.
    pub const INVALID: &str = "invalid";
    /// The handler or response validation failed.
    pub const FAILED: &str = "failed";
}

/// Registers descriptions for all standard metrics.
///
/// Call once after installing a recorder.
pub fn describe_metrics() {
    describe_counter!(REQUESTS_TOTAL, "Total number of dispatched requests by outcome");
    describe_histogram!(REQUEST_DURATION_SECONDS, "Request dispatch duration in seconds");
    describe_counter!(
        VALIDATION_FAILURES_TOTAL,
        "Total request validation failures by stage"
    );
    describe_gauge!(
        IN_FLIGHT_REQUESTS,
        "Number of requests currently being dispatched"
    );
}

/// Records a completed dispatch.
pub fn record_request(outcome: &'static str, duration: Duration) {
    counter!(REQUESTS_TOTAL, "outcome" => outcome).increment(1);
    histogram!(REQUEST_DURATION_SECONDS, "outcome" => outcome).record(duration.as_secs_f64());
}

/// Records a validation failure for a request part.
pub fn record_validation_failure(stage: &'static str) {
    counter!(VALIDATION_FAILURES_TOTAL, "stage" => stage).increment(1);
}

/// Guard that tracks an in-flight request.
///
/// Increments the gauge on creation and decrements it on drop, so the
/// count stays correct when a dispatch future is cancelled.
#[derive(Debug)]
pub struct InFlightGuard {
    _private: (),
}

impl InFlightGuard {
    /// Creates a new guard and increments the in-flight gauge.
    #[must_use]
    pub fn new() -> Self {
        gauge!(IN_FLIGHT_REQUESTS).increment(1.0);
        Self { _private: () }
    }
}

impl Default for InFlightGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        gauge!(IN_FLIGHT_REQUESTS).decrement(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        assert_eq!(REQUESTS_TOTAL, "covenant_requests_total");
        assert_eq!(VALIDATION_FAILURES_TOTAL, "covenant_validation_failures_total");
    }

    #[test]
    fn test_record_functions_without_recorder() {
        describe_metrics();
        record_request(outcome::HANDLED, Duration::from_millis(10));
        record_request(outcome::NOT_FOUND, Duration::from_millis(1));
        record_validation_failure("body");
    }

    #[test]
    fn test_in_flight_guard() {
        let guard = InFlightGuard::new();
        drop(guard);
    }
}
