//! HTTP handlers for the emergency plan service.

pub mod escalate;
pub mod health;
pub mod plan;

pub use escalate::escalate;
pub use health::{health_check, index, metrics, readiness_check};
pub use plan::create_plan;
