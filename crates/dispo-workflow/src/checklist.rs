/*
[INPUT]:  A task's checklist, the acting user, and a requested action
[OUTPUT]: Validated stage transitions ready to submit, or guard errors
[POS]:    Task domain logic - checklist progression rules
[UPDATE]: When stage transitions or authorization rules change
*/

use chrono::{DateTime, Utc};
use thiserror::Error;

use dispo_adapter::types::{
    ChecklistItem, ChecklistStatus, ChecklistUpdateRequest, SessionUser, Task,
};

/// Action requested on a checklist stage.
///
/// `Start` covers both beginning a NOT_STARTED stage and resuming a BLOCKED
/// one; the service receives the same IN_PROGRESS transition either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistAction {
    Start,
    Complete,
    Block { note: String },
}

impl ChecklistAction {
    fn verb(&self) -> &'static str {
        match self {
            ChecklistAction::Start => "start",
            ChecklistAction::Complete => "complete",
            ChecklistAction::Block { .. } => "block",
        }
    }
}

/// Guard violations. All of these are local validation failures: none of
/// them results in a request to the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecklistError {
    #[error("only the assigned user may update this task's checklist")]
    NotAssignee,

    #[error("checklist item {item_id} does not belong to this task")]
    UnknownItem { item_id: String },

    #[error("stage {order} is not the current actionable stage")]
    OutOfOrder { order: u32 },

    #[error("cannot {action} a stage that is {status:?}")]
    InvalidStatus {
        action: &'static str,
        status: ChecklistStatus,
    },

    #[error("a note describing the obstruction is required")]
    EmptyBlockedNote,
}

/// A transition that passed every guard, ready to submit as one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpdate {
    pub item_id: String,
    pub status: ChecklistStatus,
    pub blocked_note: Option<String>,
}

impl PlannedUpdate {
    /// Wire payload for `PATCH /tasks/{taskId}/checklist/{itemId}`
    pub fn into_request(self) -> ChecklistUpdateRequest {
        ChecklistUpdateRequest {
            status: self.status,
            blocked_note: self.blocked_note,
        }
    }
}

/// First stage, in ascending `order`, that is not yet COMPLETED.
///
/// `None` means every stage is done. The scan sorts by `order` instead of
/// trusting the sequence the server happened to send. Callers recompute this
/// on every decision; the result must never be cached across updates.
pub fn next_actionable_item(items: &[ChecklistItem]) -> Option<&ChecklistItem> {
    let mut ordered: Vec<&ChecklistItem> = items.iter().collect();
    ordered.sort_by_key(|item| item.order);
    ordered
        .into_iter()
        .find(|item| item.status != ChecklistStatus::Completed)
}

/// Reject state-changing requests from anyone but the current assignee.
pub fn authorize(task: &Task, actor: &SessionUser) -> Result<(), ChecklistError> {
    match task.assigned_to_id.as_deref() {
        Some(assignee) if assignee == actor.id => Ok(()),
        _ => Err(ChecklistError::NotAssignee),
    }
}

/// Evaluate every guard for the requested action and produce the transition
/// to submit.
///
/// Guards, in order: the actor must be the assignee; the item must belong to
/// the task; the item's status must admit the action; `Start` additionally
/// requires the item to be the current actionable stage, so stages cannot be
/// started out of order even when independently ready.
pub fn plan_action(
    task: &Task,
    actor: &SessionUser,
    item_id: &str,
    action: &ChecklistAction,
) -> Result<PlannedUpdate, ChecklistError> {
    authorize(task, actor)?;

    let item = task
        .checklist_items
        .iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| ChecklistError::UnknownItem {
            item_id: item_id.to_string(),
        })?;

    match action {
        ChecklistAction::Start => match item.status {
            ChecklistStatus::NotStarted | ChecklistStatus::Blocked => {
                let actionable = next_actionable_item(&task.checklist_items);
                if actionable.map(|actionable| actionable.id.as_str()) != Some(item.id.as_str()) {
                    return Err(ChecklistError::OutOfOrder { order: item.order });
                }
                Ok(PlannedUpdate {
                    item_id: item.id.clone(),
                    status: ChecklistStatus::InProgress,
                    blocked_note: None,
                })
            }
            status => Err(ChecklistError::InvalidStatus {
                action: action.verb(),
                status,
            }),
        },
        ChecklistAction::Complete => match item.status {
            ChecklistStatus::InProgress => Ok(PlannedUpdate {
                item_id: item.id.clone(),
                status: ChecklistStatus::Completed,
                blocked_note: None,
            }),
            status => Err(ChecklistError::InvalidStatus {
                action: action.verb(),
                status,
            }),
        },
        ChecklistAction::Block { note } => match item.status {
            ChecklistStatus::InProgress => {
                if note.trim().is_empty() {
                    return Err(ChecklistError::EmptyBlockedNote);
                }
                Ok(PlannedUpdate {
                    item_id: item.id.clone(),
                    status: ChecklistStatus::Blocked,
                    blocked_note: Some(note.clone()),
                })
            }
            status => Err(ChecklistError::InvalidStatus {
                action: action.verb(),
                status,
            }),
        },
    }
}

/// Actions the given user may take on one stage right now, for rendering
/// buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Start,
    Resume,
    Complete,
    Block,
}

pub fn available_actions(task: &Task, actor: &SessionUser, item: &ChecklistItem) -> Vec<ActionKind> {
    if authorize(task, actor).is_err() {
        return Vec::new();
    }

    let is_actionable = next_actionable_item(&task.checklist_items)
        .map(|actionable| actionable.id == item.id)
        .unwrap_or(false);

    match item.status {
        ChecklistStatus::Completed => Vec::new(),
        ChecklistStatus::InProgress => vec![ActionKind::Complete, ActionKind::Block],
        ChecklistStatus::NotStarted if is_actionable => vec![ActionKind::Start],
        ChecklistStatus::Blocked if is_actionable => vec![ActionKind::Resume],
        _ => Vec::new(),
    }
}

/// Apply a validated transition to an in-memory item.
///
/// `started_at` is only set on the first move into IN_PROGRESS, so resuming
/// a blocked stage keeps the original start time, and a prior `blocked_note`
/// stays in place as history. Timestamps never change without their
/// accompanying status change.
pub fn apply_update(item: &mut ChecklistItem, update: &PlannedUpdate, now: DateTime<Utc>) {
    item.status = update.status;
    match update.status {
        ChecklistStatus::InProgress => {
            if item.started_at.is_none() {
                item.started_at = Some(now);
            }
        }
        ChecklistStatus::Completed => {
            item.completed_at = Some(now);
        }
        ChecklistStatus::Blocked => {
            item.blocked_note = update.blocked_note.clone();
        }
        ChecklistStatus::NotStarted => {}
    }
    item.updated_at = now;
}
