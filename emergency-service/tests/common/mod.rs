#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use emergency_service::config::{EmergencyConfig, LlmConfig, PlannerConfig, ProviderKind};
use emergency_service::models::{EmergencyPlan, EmergencyType};
use emergency_service::services::providers::TextProvider;
use emergency_service::services::{FallbackTable, PlanGenerator, PlannerSettings};
use emergency_service::startup::{build_router, AppState, Application};
use serde_json::{json, Value};
use service_core::config::Config;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a test instance on a random port.
pub fn test_config() -> EmergencyConfig {
    EmergencyConfig {
        common: Config {
            port: 0,
            ..Config::default()
        },
        llm: LlmConfig {
            provider: ProviderKind::Disabled,
            api_key: String::new(),
            model: "mock".to_string(),
            base_url: String::new(),
        },
        planner: PlannerConfig {
            timeout_ms: 1_000,
            ..PlannerConfig::default()
        },
    }
}

/// Router backed by `provider`, for in-process `oneshot` requests.
pub fn router_with(provider: Arc<dyn TextProvider>) -> Router {
    let settings = PlannerSettings::from_config(&test_config().planner);
    build_router(AppState::new(PlanGenerator::new(provider, settings)))
}

/// Spawn a real server backed by `provider` and return its base URL.
pub async fn spawn_app(provider: Arc<dyn TextProvider>) -> String {
    let app = Application::build_with_provider(test_config(), provider)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    format!("http://127.0.0.1:{}", port)
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub fn plan_request(emergency_type: &str, immediate_danger: bool) -> Value {
    json!({
        "emergency_type": emergency_type,
        "immediate_danger": immediate_danger
    })
}

/// A complete plan as a model would return it.
pub fn model_plan(label: &str) -> Value {
    json!({
        "immediate_actions": [format!("Act on the {} now", label), "Call emergency services"],
        "do_not_do": [format!("Do not ignore the {}", label)],
        "evacuation_decision": format!("Plan for {}", label),
        "escalation_guidance": "Call 112 if anyone is hurt",
        "safety_disclaimer": "General guidance only"
    })
}

/// Emergency type named on the first line of a planner prompt.
pub fn prompt_type(prompt: &str) -> Option<String> {
    prompt
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Emergency type: "))
        .map(|t| t.trim().to_string())
}

pub fn fallback_plan(emergency_type: EmergencyType) -> EmergencyPlan {
    FallbackTable::standard().plan_for(emergency_type)
}

pub fn assert_plan_complete(body: &Value) {
    for field in ["immediate_actions", "do_not_do"] {
        let items = body[field].as_array().unwrap_or_else(|| panic!("{field} missing"));
        assert!(!items.is_empty(), "{field} is empty");
        for item in items {
            let item = item.as_str().unwrap_or_else(|| panic!("{field} entry is not a string"));
            assert!(!item.trim().is_empty(), "{field} has a blank entry");
        }
    }
    for field in ["evacuation_decision", "escalation_guidance", "safety_disclaimer"] {
        let text = body[field].as_str().unwrap_or_else(|| panic!("{field} missing"));
        assert!(!text.trim().is_empty(), "{field} is blank");
    }
}
