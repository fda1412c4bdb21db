pub mod fallback;
pub mod metrics;
pub mod planner;
pub mod prompt;
pub mod providers;

pub use fallback::FallbackTable;
pub use planner::{PlanGenerator, PlannerSettings};
