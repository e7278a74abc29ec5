// tests/api_validation.rs
//
// Rejection paths for POST /api/risk/assess: missing financials, range
// violations, and malformed bodies. Engine-level rejections carry a JSON
// body with a `detail` field; decoder-level rejections come from Axum.

use axum::{
    body::{self, Body},
    response::Response,
    Router,
};
use http::{Request, StatusCode};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use venture_risk_analyzer::api::{self, AppState};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

fn test_router() -> Router {
    api::create_router(AppState::default())
}

async fn post_assess(body_text: String) -> Response {
    let req = Request::builder()
        .method("POST")
        .uri("/api/risk/assess")
        .header("content-type", "application/json")
        .body(Body::from(body_text))
        .expect("build POST /api/risk/assess");
    test_router()
        .oneshot(req)
        .await
        .expect("oneshot /api/risk/assess")
}

async fn detail_of(resp: Response) -> String {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read error body")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse error json");
    v["detail"].as_str().expect("detail string").to_string()
}

/// Minimal financial group that passes validation.
fn minimal_financials() -> Json {
    json!({ "base_monthly_revenue": 50000, "burn": 40000 })
}

#[tokio::test]
async fn missing_financials_is_rejected_with_400() {
    let payload = json!({
        "analysisData": {
            "team": { "founders": [], "team_size": 4 }
        }
    });
    let resp = post_assess(payload.to_string()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        detail_of(resp).await,
        "Financial signals are required for risk assessment"
    );
}

#[tokio::test]
async fn empty_object_also_lacks_financials() {
    let resp = post_assess("{}".to_string()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_iterations_is_rejected_with_422() {
    let payload = json!({
        "analysisData": { "financials": minimal_financials() },
        "mcs": { "iterations": 25 }
    });
    let resp = post_assess(payload.to_string()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = detail_of(resp).await;
    assert!(detail.contains("mcs.iterations"), "detail = {detail}");
}

#[tokio::test]
async fn out_of_range_horizon_is_rejected_with_422() {
    let payload = json!({
        "analysisData": { "financials": minimal_financials() },
        "mcs": { "horizon_months": 90 }
    });
    let resp = post_assess(payload.to_string()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = detail_of(resp).await;
    assert!(detail.contains("mcs.horizon_months"), "detail = {detail}");
}

#[tokio::test]
async fn senior_ratio_above_one_is_rejected_with_422() {
    let payload = json!({
        "analysisData": {
            "team": { "senior_ratio": 1.4 },
            "financials": minimal_financials()
        }
    });
    let resp = post_assess(payload.to_string()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = detail_of(resp).await;
    assert!(detail.contains("senior_ratio"), "detail = {detail}");
}

#[tokio::test]
async fn negative_revenue_is_rejected_with_422() {
    let payload = json!({
        "analysisData": {
            "financials": { "base_monthly_revenue": -5.0 }
        }
    });
    let resp = post_assess(payload.to_string()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let detail = detail_of(resp).await;
    assert!(detail.contains("base_monthly_revenue"), "detail = {detail}");
}

#[tokio::test]
async fn negative_weights_are_recovered_not_rejected() {
    let payload = json!({
        "weights": {
            "teamStrength": -1.0,
            "marketOpportunity": -1.0,
            "productMoat": -1.0,
            "goToMarket": -1.0,
            "financials": -1.0
        },
        "analysisData": { "financials": minimal_financials() }
    });
    let resp = post_assess(payload.to_string()).await;
    assert_eq!(resp.status(), StatusCode::OK, "weights are clamped, not rejected");
    let flag = resp
        .headers()
        .get("x-weights-normalized")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    assert_eq!(flag, "true");
}

#[tokio::test]
async fn type_mismatches_are_rejected_by_the_decoder() {
    let payload = json!({
        "analysisData": {
            "financials": { "base_monthly_revenue": "lots" }
        }
    });
    let resp = post_assess(payload.to_string()).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_json_is_rejected_with_400() {
    let resp = post_assess("{not json".to_string()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
