// tests/metrics_endpoint.rs
//
// The full app (API router merged with the exposition route) records request
// counters through the process-global Prometheus recorder. Both tests build
// the app via `app()` so the recorder is installed exactly once.

use axum::body::{self, Body};
use http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt as _; // for `oneshot`

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

async fn post_assess(body_text: String) -> StatusCode {
    let app = venture_risk_analyzer::app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/risk/assess")
        .header("content-type", "application/json")
        .body(Body::from(body_text))
        .expect("build POST /api/risk/assess");
    app.oneshot(req)
        .await
        .expect("oneshot /api/risk/assess")
        .status()
}

async fn render_exposition() -> String {
    let app = venture_risk_analyzer::app();
    let req = Request::builder()
        .method("GET")
        .uri("/metrics")
        .body(Body::empty())
        .expect("build GET /metrics");
    let resp = app.oneshot(req).await.expect("oneshot /metrics");
    assert_eq!(resp.status(), StatusCode::OK, "metrics should be 200");
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read exposition")
        .to_vec();
    String::from_utf8(bytes).expect("utf8 exposition")
}

#[tokio::test]
async fn exposition_contains_expected_series() {
    let accepted = json!({
        "analysisData": {
            "financials": { "base_monthly_revenue": 50000, "burn": 40000 }
        }
    });
    let status = post_assess(accepted.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let exposition = render_exposition().await;
    for series in [
        "risk_assessment_requests_total",
        "risk_assessment_duration_ms",
        "risk_assessment_default_iterations",
    ] {
        assert!(
            exposition.contains(series),
            "exposition missing series '{series}'"
        );
    }
}

#[tokio::test]
async fn rejected_assessments_are_counted() {
    let status = post_assess("{}".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let exposition = render_exposition().await;
    assert!(
        exposition.contains("risk_assessment_rejected_total"),
        "exposition missing rejection counter"
    );
}
