//! Integration tests for `POST /escalate`.

mod common;

use axum::http::{Method, StatusCode};
use common::*;
use emergency_service::services::providers::mock::MockTextProvider;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn escalation_echoes_payload_with_action() {
    let router = router_with(Arc::new(MockTextProvider::failing()));

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/escalate",
            &json!({ "location": "block 4" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "escalated");
    assert_eq!(body["received"], json!({ "location": "block 4" }));
    assert!(!body["decision"].as_str().unwrap().is_empty());
    assert!(!body["action"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn escalation_accepts_nested_payloads() {
    let router = router_with(Arc::new(MockTextProvider::failing()));
    let payload = json!({
        "location": { "building": "B", "floor": 3 },
        "people": ["a", "b"],
        "injured": true
    });

    let response = router
        .oneshot(json_request(Method::POST, "/escalate", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["received"], payload);
}

#[tokio::test]
async fn escalation_rejects_non_object_payload() {
    let provider = Arc::new(MockTextProvider::failing());
    let router = router_with(provider.clone());

    let response = router
        .oneshot(json_request(Method::POST, "/escalate", &json!("help")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(provider.calls(), 0);
}
