/*
[INPUT]:  Public API exports for dispo-workflow crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod checklist;
pub mod config;
pub mod flow;
pub mod progress;

// Re-export main types for convenience
pub use checklist::{ChecklistAction, ChecklistError, next_actionable_item, plan_action};
pub use config::AppConfig;
pub use flow::{FlowError, TaskFlow};
pub use progress::compute_progress;
