use std::sync::OnceLock;

use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::model::DEFAULT_ITERATIONS;

// The recorder is process-global and can only be installed once; tests build
// the app repeatedly, so the handle is cached here.
static PROMETHEUS: OnceLock<PrometheusHandle> = OnceLock::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Initialize the Prometheus recorder and expose a static gauge with the
    /// default simulation depth.
    pub fn init() -> Self {
        let handle = PROMETHEUS
            .get_or_init(|| {
                // Default buckets to avoid API differences across crate versions.
                PrometheusBuilder::new()
                    .install_recorder()
                    .expect("prometheus: install recorder")
            })
            .clone();

        gauge!("risk_assessment_default_iterations").set(f64::from(DEFAULT_ITERATIONS));

        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
