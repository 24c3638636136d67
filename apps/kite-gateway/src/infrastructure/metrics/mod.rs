//! Prometheus Metrics Module
//!
//! # Metrics
//!
//! - `kite_gateway_http_requests_total`: Inbound requests by route and status
//! - `kite_gateway_http_request_seconds`: Inbound request latency
//! - `kite_gateway_upstream_requests_total`: Kite API calls by operation and outcome
//! - `kite_gateway_upstream_request_seconds`: Kite API call latency
//! - `kite_gateway_session_active`: 1 while a session is held
//!
//! Metrics are exposed at `/metrics` on the main HTTP port.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// Subsequent calls return the handle installed by the first call.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "kite_gateway_http_requests_total",
        "Total inbound HTTP requests by route and status"
    );
    describe_histogram!(
        "kite_gateway_http_request_seconds",
        "Inbound HTTP request latency"
    );
    describe_counter!(
        "kite_gateway_upstream_requests_total",
        "Total Kite API calls by operation and outcome"
    );
    describe_histogram!(
        "kite_gateway_upstream_request_seconds",
        "Kite API call latency"
    );
    describe_gauge!(
        "kite_gateway_session_active",
        "Whether a brokerage session is currently held"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Kite API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOperation {
    /// Request-token exchange.
    GenerateSession,
    /// Mutual fund holdings fetch.
    MfHoldings,
    /// Access token invalidation.
    InvalidateSession,
}

impl UpstreamOperation {
    const fn as_str(self) -> &'static str {
        match self {
            Self::GenerateSession => "generate_session",
            Self::MfHoldings => "mf_holdings",
            Self::InvalidateSession => "invalidate_session",
        }
    }
}

const fn outcome(success: bool) -> &'static str {
    if success { "success" } else { "error" }
}

/// Record a completed Kite API call.
pub fn record_upstream_call(operation: UpstreamOperation, success: bool, duration: Duration) {
    counter!(
        "kite_gateway_upstream_requests_total",
        "operation" => operation.as_str(),
        "outcome" => outcome(success)
    )
    .increment(1);
    histogram!(
        "kite_gateway_upstream_request_seconds",
        "operation" => operation.as_str()
    )
    .record(duration.as_secs_f64());
}

/// Record a completed inbound HTTP request.
pub fn record_http_request(method: &str, route: &str, status: u16, duration: Duration) {
    counter!(
        "kite_gateway_http_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "kite_gateway_http_request_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(duration.as_secs_f64());
}

/// Update the session gauge.
pub fn set_session_active(active: bool) {
    gauge!("kite_gateway_session_active").set(if active { 1.0 } else { 0.0 });
}

// =============================================================================
// Tests
// =============================================================================
