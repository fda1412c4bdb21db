use axum::{extract::rejection::JsonRejection, Json};
use service_core::error::AppError;

use crate::models::{EscalationRequest, EscalationResponse};
use crate::services::metrics;

/// `POST /escalate`: acknowledge an escalation and echo the payload back.
#[tracing::instrument(skip(payload))]
pub async fn escalate(
    payload: Result<Json<EscalationRequest>, JsonRejection>,
) -> Result<Json<EscalationResponse>, AppError> {
    let Json(received) = payload?;

    tracing::warn!(payload_keys = received.len(), "Escalation triggered");
    metrics::record_escalation();

    Ok(Json(EscalationResponse::acknowledge(received)))
}
