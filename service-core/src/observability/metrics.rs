//! Prometheus export for everything recorded through the `metrics` macros.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder.
///
/// Only the first call installs anything, so test harnesses that build several
/// applications in one process can call it freely.
pub fn init_metrics() {
    METRICS_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        if let Err(e) = metrics::set_global_recorder(recorder) {
            tracing::warn!("Metrics recorder already installed elsewhere: {}", e);
        }

        handle
    });
}

/// Current metrics in the Prometheus text format.
pub fn render_metrics() -> String {
    match METRICS_HANDLE.get() {
        Some(handle) => {
            handle.run_upkeep();
            handle.render()
        }
        None => "# Metrics recorder not initialized\n".to_string(),
    }
}
