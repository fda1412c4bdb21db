//! Integration tests for the metadata, health, readiness and metrics endpoints.

mod common;

use axum::http::{header, Method, Request, StatusCode};
use common::*;
use emergency_service::services::providers::disabled::DisabledTextProvider;
use emergency_service::services::providers::mock::MockTextProvider;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_healthy() {
    let router = router_with(Arc::new(DisabledTextProvider));

    let response = router.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn index_lists_supported_emergencies() {
    let router = router_with(Arc::new(DisabledTextProvider));

    let response = router.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "emergency-service");
    assert!(!body["version"].as_str().unwrap().is_empty());
    assert_eq!(
        body["supported_emergencies"],
        json!(["fire", "flood", "earthquake"])
    );
}

#[tokio::test]
async fn readiness_reports_healthy_provider() {
    let router = router_with(Arc::new(MockTextProvider::failing()));

    let response = router.oneshot(get_request("/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ready" }));
}

#[tokio::test]
async fn readiness_reports_unreachable_provider() {
    let router = router_with(Arc::new(MockTextProvider::failing().with_unhealthy()));

    let response = router.oneshot(get_request("/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await, json!({ "status": "unavailable" }));
}

#[tokio::test]
async fn readiness_with_disabled_provider_is_ready() {
    let router = router_with(Arc::new(DisabledTextProvider));

    let response = router.oneshot(get_request("/ready")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn fallback_only_mode_serves_plans() {
    let router = router_with(Arc::new(DisabledTextProvider));

    let response = router
        .oneshot(json_request(Method::POST, "/plan", &plan_request("fire", false)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-plan-source"], "fallback");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let router = router_with(Arc::new(DisabledTextProvider));

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");

    let response = router.oneshot(get_request("/health")).await.unwrap();
    assert!(!response.headers()["x-request-id"].is_empty());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let router = router_with(Arc::new(DisabledTextProvider));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/plan")
        .header(header::ORIGIN, "https://frontend.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn metrics_endpoint_reports_plans() {
    let base_url = spawn_app(Arc::new(DisabledTextProvider)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/plan", base_url))
        .json(&plan_request("earthquake", true))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let metrics = client
        .get(format!("{}/metrics", base_url))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read metrics");

    assert!(metrics.contains("plan_requests_total"));
    assert!(metrics.contains("emergency_type=\"earthquake\""));
    assert!(metrics.contains("http_requests_total"));
}
