//! Metrics collection and Prometheus export.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder as the global `metrics` recorder.
///
/// Idempotent: later calls return the handle from the first one.
pub fn init_metrics() -> &'static PrometheusHandle {
    METRICS_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        if metrics::set_global_recorder(recorder).is_err() {
            tracing::warn!("A global metrics recorder was already installed; /metrics will be empty");
        }
        handle
    })
}

/// Current metrics in Prometheus text format, for the /metrics endpoint.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}

pub fn record_store_operation(operation: &'static str, succeeded: bool) {
    let outcome = if succeeded { "ok" } else { "error" };
    counter!(
        "catalog_store_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}
