use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::models::EmergencyType;
use crate::services::metrics::get_metrics;
use crate::startup::AppState;

pub const SERVICE_NAME: &str = "emergency-service";

/// Service metadata.
pub async fn index() -> impl IntoResponse {
    let supported: Vec<&str> = EmergencyType::ALL.iter().map(|t| t.as_str()).collect();

    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "supported_emergencies": supported
    }))
}

/// Liveness check.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Readiness check: the completion provider must be reachable.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let provider = state.planner.provider();
    match provider.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "Provider not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}

/// Prometheus scrape endpoint.
pub async fn metrics() -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        get_metrics(),
    )
}
