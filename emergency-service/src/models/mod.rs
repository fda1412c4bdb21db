//! Domain models for the emergency plan service.

pub mod emergency;
pub mod escalation;
pub mod plan;

pub use emergency::{EmergencyInput, EmergencyType};
pub use escalation::{EscalationRequest, EscalationResponse};
pub use plan::{EmergencyPlan, PlanOutcome, PlanSource};
