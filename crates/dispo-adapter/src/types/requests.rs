/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{ChecklistStatus, Priority, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
}

/// Assigns a drafted task to a section with a note from the leader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispositionRequest {
    pub assigned_to_role: Role,
    pub disposition_note: String,
}

/// Payload for `PATCH /tasks/{taskId}/checklist/{itemId}`.
///
/// `blocked_note` is only sent alongside a transition into BLOCKED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistUpdateRequest {
    pub status: ChecklistStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn checklist_update_omits_absent_note() {
        let request = ChecklistUpdateRequest {
            status: ChecklistStatus::InProgress,
            blocked_note: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"status": "IN_PROGRESS"}));
    }

    #[test]
    fn checklist_update_includes_note_when_blocking() {
        let request = ChecklistUpdateRequest {
            status: ChecklistStatus::Blocked,
            blocked_note: Some("waiting on approval".to_string()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"status": "BLOCKED", "blockedNote": "waiting on approval"})
        );
    }

    #[test]
    fn disposition_request_wire_format() {
        let request = DispositionRequest {
            assigned_to_role: Role::SectionOperations,
            disposition_note: "handle this week".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "assignedToRole": "SECTION_OPERATIONS",
                "dispositionNote": "handle this week"
            })
        );
    }
}
