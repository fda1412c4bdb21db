use serde::Serialize;
use serde_json::{Map, Value};

/// Escalation payloads are schema-less: any JSON object is accepted and echoed.
pub type EscalationRequest = Map<String, Value>;

pub const ESCALATION_DECISION: &str = "Escalation triggered";

pub const ESCALATION_ACTION: &str =
    "Contact your local emergency services immediately (for example 911 or 112).";

#[derive(Debug, Serialize)]
pub struct EscalationResponse {
    pub status: &'static str,
    pub decision: &'static str,
    pub received: EscalationRequest,
    pub action: &'static str,
}

impl EscalationResponse {
    pub fn acknowledge(received: EscalationRequest) -> Self {
        Self {
            status: "escalated",
            decision: ESCALATION_DECISION,
            received,
            action: ESCALATION_ACTION,
        }
    }
}
