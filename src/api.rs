//! # HTTP Surface
//! Axum router and handlers for the assessment service. Handlers stay thin:
//! decode, delegate to [`crate::engine`], encode. Scoring behavior is unit
//! tested in the engine; the integration tests under `tests/` cover status
//! codes, headers, and wire shapes.

use std::time::Instant;

use axum::extract::State;
use axum::http::{header::HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics::{counter, histogram};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::engine::{self, AssessError};
use crate::model::RiskAssessmentRequest;
use crate::simulate::DEFAULT_SEED;

/// Response header reporting whether the caller's weights were replaced or
/// rescaled. Lowercase so it can be built with `HeaderName::from_static`.
pub const WEIGHTS_NORMALIZED_HEADER: &str = "x-weights-normalized";

#[derive(Clone)]
pub struct AppState {
    /// Seed for the revenue simulation; fixed so responses are reproducible.
    pub seed: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self { seed: DEFAULT_SEED }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/risk/assess", post(assess_risk))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn assess_risk(
    State(state): State<AppState>,
    Json(request): Json<RiskAssessmentRequest>,
) -> Result<Response, ApiError> {
    counter!("risk_assessment_requests_total").increment(1);
    let started = Instant::now();

    let assessment = engine::assess(&request, state.seed)?;
    if assessment.weights_normalized {
        counter!("risk_assessment_weights_normalized_total").increment(1);
    }
    histogram!("risk_assessment_duration_ms").record(started.elapsed().as_secs_f64() * 1e3);

    let flag = if assessment.weights_normalized {
        "true"
    } else {
        "false"
    };
    let mut response = Json(assessment.response).into_response();
    response.headers_mut().insert(
        HeaderName::from_static(WEIGHTS_NORMALIZED_HEADER),
        HeaderValue::from_static(flag),
    );
    Ok(response)
}

/// JSON error body in the `{"detail": ...}` shape callers already parse.
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl From<AssessError> for ApiError {
    fn from(err: AssessError) -> Self {
        let status = match err {
            AssessError::MissingFinancials => StatusCode::BAD_REQUEST,
            AssessError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        counter!("risk_assessment_rejected_total").increment(1);
        warn!(status = %self.status, detail = %self.detail, "assessment rejected");
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
