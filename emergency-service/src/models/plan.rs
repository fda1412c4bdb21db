use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A structured response plan returned to callers.
///
/// Plans parsed from model output must pass [`Validate`] before they are
/// served: both lists need at least one entry, and no list entry or string
/// may be empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EmergencyPlan {
    #[validate(
        length(min = 1, message = "at least one immediate action is required"),
        custom(function = "no_blank_items")
    )]
    pub immediate_actions: Vec<String>,
    #[validate(
        length(min = 1, message = "at least one thing to avoid is required"),
        custom(function = "no_blank_items")
    )]
    pub do_not_do: Vec<String>,
    #[validate(custom(function = "not_blank"))]
    pub evacuation_decision: String,
    #[validate(custom(function = "not_blank"))]
    pub escalation_guidance: String,
    #[validate(custom(function = "not_blank"))]
    pub safety_disclaimer: String,
}

fn blank_error(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("blank");
    error.message = Some(message.into());
    error
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(blank_error("text cannot be empty or whitespace"));
    }
    Ok(())
}

fn no_blank_items(items: &[String]) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(blank_error("list entries cannot be empty or whitespace"));
    }
    Ok(())
}

/// Which path produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    /// Parsed from the completion provider's output.
    Ai,
    /// Taken from the static fallback table.
    Fallback,
}

impl PlanSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanSource::Ai => "ai",
            PlanSource::Fallback => "fallback",
        }
    }
}

/// A plan together with the path that produced it.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: EmergencyPlan,
    pub source: PlanSource,
}
