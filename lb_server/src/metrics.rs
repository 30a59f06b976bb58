//! Prometheus metrics for monitoring leaderboard server health and usage.
//!
//! Metrics are exposed in Prometheus text format on a dedicated listener
//! when `METRICS_BIND` is set. Without an installed exporter every
//! recording call is a no-op.
//!
//! # Metrics
//!
//! - `http_requests_total` (method, path, status)
//! - `http_request_duration_ms` (method, path)
//! - `tournament_operations_total` (operation, outcome)

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
///
/// # Returns
///
/// Result indicating success or error message
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

/// Record HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

/// Record the outcome of a tournament operation.
///
/// `outcome` is `"ok"` or the error class (`"validation"`, `"conflict"`,
/// `"not_found"`, `"store"`).
pub fn tournament_operation(operation: &'static str, outcome: &'static str) {
    metrics::counter!("tournament_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_exporter_is_noop() {
        http_requests_total("GET", "/players", 200);
        http_request_duration_ms("GET", "/players", 1.5);
        tournament_operation("list_players", "ok");
    }
}
