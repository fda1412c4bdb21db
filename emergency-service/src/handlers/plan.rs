use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::AppError;

use crate::models::EmergencyInput;
use crate::startup::AppState;

/// Response header naming the path that produced the plan (`ai` or `fallback`).
pub const PLAN_SOURCE_HEADER: &str = "x-plan-source";

/// `POST /plan`: validate the description and return a response plan.
///
/// Invalid payloads are rejected before the planner runs. Provider trouble
/// never reaches the caller; it only changes `x-plan-source`.
#[tracing::instrument(skip(state, payload))]
pub async fn create_plan(
    State(state): State<AppState>,
    payload: Result<Json<EmergencyInput>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::info!(error = %rejection.body_text(), "Rejected plan request");
        AppError::from(rejection)
    })?;

    let outcome = state.planner.generate_plan(&input).await;

    let mut response = Json(outcome.plan).into_response();
    response.headers_mut().insert(
        PLAN_SOURCE_HEADER,
        HeaderValue::from_static(outcome.source.as_str()),
    );

    Ok(response)
}
