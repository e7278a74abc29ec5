// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod engine;
pub mod factors;
pub mod membership;
pub mod metrics;
pub mod model;
pub mod narrative;
pub mod simulate;
pub mod weights;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState, WEIGHTS_NORMALIZED_HEADER};
pub use crate::engine::{assess, AssessError, Assessment};
pub use crate::model::{RiskAssessmentRequest, RiskAssessmentResponse};
pub use crate::simulate::DEFAULT_SEED;

use axum::Router;

/// Full application router: assessment API plus the `/metrics` exposition
/// endpoint, with the Prometheus recorder installed.
pub fn app() -> Router {
    let metrics = crate::metrics::Metrics::init();
    create_router(AppState::default()).merge(metrics.router())
}
