/*
[INPUT]:  A task's checklist items
[OUTPUT]: Completion rollup (total, completed, percentage)
[POS]:    Task domain logic - progress aggregation
[UPDATE]: When the progress formula changes
*/

use dispo_adapter::types::{ChecklistItem, ChecklistStatus, TaskProgress};

/// Recompute the completion rollup from scratch.
///
/// Called after every status-changing event instead of patching counters
/// incrementally, so the rollup cannot drift from the server-confirmed
/// items. An empty checklist reports 0%.
pub fn compute_progress(items: &[ChecklistItem]) -> TaskProgress {
    let total = items.len() as u32;
    let completed = items
        .iter()
        .filter(|item| item.status == ChecklistStatus::Completed)
        .count() as u32;

    let percentage = if total == 0 {
        0
    } else {
        (f64::from(completed) / f64::from(total) * 100.0).round() as u32
    };

    TaskProgress {
        total,
        completed,
        percentage,
    }
}
