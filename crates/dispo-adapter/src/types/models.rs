/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{ChecklistStatus, Priority, Role, TaskStatus};

/// The signed-in account, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// User reference embedded in tasks (creator, assignee, CC observers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

/// Directory entry from the user listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One stage of a task's work checklist.
///
/// `task_id` is an association back-reference only; the owning task controls
/// the item's lifetime. `order` is 1-based and unique within a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub order: u32,
    pub status: ChecklistStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub blocked_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Completion rollup over a task's checklist items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProgress {
    pub total: u32,
    pub completed: u32,
    pub percentage: u32,
}

/// A tracked task with its ordered checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub creator_id: String,
    pub creator: TaskUser,
    #[serde(default)]
    pub assigned_to_id: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<TaskUser>,
    #[serde(default)]
    pub assigned_to_role: Option<Role>,
    #[serde(default)]
    pub cc_users: Vec<TaskUser>,
    #[serde(default)]
    pub disposition_note: Option<String>,
    #[serde(default)]
    pub dispositioned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dispositioned_by: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub checklist_items: Vec<ChecklistItem>,
    /// Server-side rollup. Display code recomputes this from the items on
    /// every render instead of trusting a possibly stale snapshot.
    pub progress: TaskProgress,
}

/// Task summary embedded in a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTask {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
}

/// Feed entry addressed to a user or to a whole role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: Option<String>,
    pub role: Role,
    pub task_id: String,
    pub title: String,
    pub subtitle: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub task: NotificationTask,
    #[serde(default)]
    pub user: Option<TaskUser>,
}

/// Offset pagination block shared by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Whether another page can be fetched after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Count plus the share of this month, for dashboard tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountWithMonthly {
    pub count: u64,
    pub this_month: u64,
}

/// Count plus its percentage of all tasks, for dashboard tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountWithShare {
    pub count: u64,
    pub percentage: f64,
}

/// Per-section rollup on the monitoring dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStatistics {
    pub name: String,
    pub section: Role,
    pub total: u64,
    pub completed: u64,
    pub in_progress: u64,
    pub stuck: u64,
    pub last_update: DateTime<Utc>,
}

/// Dashboard statistics for the monitoring screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatistics {
    pub total_tasks: CountWithMonthly,
    pub completed_tasks: CountWithShare,
    pub in_progress_tasks: CountWithShare,
    pub stuck_tasks: CountWithMonthly,
    pub pending_disposition_tasks: CountWithMonthly,
    pub by_section: Vec<SectionStatistics>,
}

/// A task flagged by monitoring as stuck on one of its stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StuckTask {
    pub id: String,
    pub title: String,
    pub section: Role,
    pub assignee: String,
    pub stuck_stage: String,
    pub total_stages: u32,
    pub stuck_since: DateTime<Utc>,
    pub stuck_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_deserializes_with_optional_fields_missing() {
        let value = json!({
            "id": "task-1",
            "title": "Quarterly report",
            "description": "Compile the quarterly report",
            "status": "DRAFT",
            "priority": 2,
            "creatorId": "user-1",
            "creator": {
                "id": "user-1",
                "name": "Leader One",
                "email": "leader@example.test",
                "role": "LEADER"
            },
            "startDate": null,
            "dueDate": "2025-03-01T00:00:00Z",
            "completedAt": null,
            "createdAt": "2025-02-01T08:00:00Z",
            "updatedAt": "2025-02-01T08:00:00Z",
            "checklistItems": [],
            "progress": {"total": 0, "completed": 0, "percentage": 0}
        });

        let task: Task = serde_json::from_value(value).expect("task should deserialize");

        assert_eq!(task.status, TaskStatus::Draft);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.assigned_to.is_none());
        assert!(task.cc_users.is_empty());
    }

    #[test]
    fn checklist_item_deserializes_camel_case() {
        let value = json!({
            "id": "item-1",
            "taskId": "task-1",
            "title": "Collect data",
            "description": "Pull the raw numbers",
            "order": 1,
            "status": "IN_PROGRESS",
            "startedAt": "2025-02-02T09:00:00Z",
            "completedAt": null,
            "blockedNote": null,
            "createdAt": "2025-02-01T08:00:00Z",
            "updatedAt": "2025-02-02T09:00:00Z"
        });

        let item: ChecklistItem = serde_json::from_value(value).expect("item should deserialize");

        assert_eq!(item.task_id, "task-1");
        assert_eq!(item.status, ChecklistStatus::InProgress);
        assert!(item.started_at.is_some());
        assert!(item.completed_at.is_none());
    }

    #[test]
    fn pagination_has_next() {
        let pagination = Pagination {
            page: 1,
            limit: 10,
            total: 25,
            total_pages: 3,
        };
        assert!(pagination.has_next());

        let last = Pagination {
            page: 3,
            ..pagination
        };
        assert!(!last.has_next());
    }
}
