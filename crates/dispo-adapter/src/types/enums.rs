/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Lifecycle status of a task, as reported by the server.
///
/// Task-level transitions are driven server-side; clients only render the
/// reported value and never compute it locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Draft,
    Dispositioned,
    InProgress,
    Stuck,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Draft => "Draft",
            TaskStatus::Dispositioned => "New assignment",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Stuck => "Stuck",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
        }
    }
}

/// Status of a single checklist stage within a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecklistStatus {
    NotStarted,
    InProgress,
    Blocked,
    Completed,
}

impl ChecklistStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChecklistStatus::NotStarted => "Not started",
            ChecklistStatus::InProgress => "In progress",
            ChecklistStatus::Blocked => "Blocked",
            ChecklistStatus::Completed => "Completed",
        }
    }
}

/// Task priority. Serialized as the numeric levels the service uses
/// (1 = low, 2 = medium, 3 = high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority as u8
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(format!("invalid priority level: {other}")),
        }
    }
}

/// Organizational role of a user. A closed set: unknown role strings from
/// the server are a deserialization error, never a silent pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Leader,
    SectionPlanning,
    SectionOperations,
    SectionLogistics,
    SectionPersonnel,
}

impl Role {
    /// Wire value, also used in path segments.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Leader => "LEADER",
            Role::SectionPlanning => "SECTION_PLANNING",
            Role::SectionOperations => "SECTION_OPERATIONS",
            Role::SectionLogistics => "SECTION_LOGISTICS",
            Role::SectionPersonnel => "SECTION_PERSONNEL",
        }
    }

    /// Leaders create and disposition tasks; sections execute them.
    pub fn is_leader(&self) -> bool {
        matches!(self, Role::Leader)
    }

    pub fn is_section(&self) -> bool {
        !self.is_leader()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_priority_roundtrip() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "3");

        let parsed: Priority = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn test_priority_rejects_unknown_level() {
        let result = serde_json::from_str::<Priority>("7");
        assert!(result.is_err());
    }

    #[rstest]
    #[case(Role::Leader, "\"LEADER\"")]
    #[case(Role::SectionPlanning, "\"SECTION_PLANNING\"")]
    #[case(Role::SectionOperations, "\"SECTION_OPERATIONS\"")]
    #[case(Role::SectionLogistics, "\"SECTION_LOGISTICS\"")]
    #[case(Role::SectionPersonnel, "\"SECTION_PERSONNEL\"")]
    fn test_role_wire_format(#[case] role: Role, #[case] wire: &str) {
        assert_eq!(serde_json::to_string(&role).unwrap(), wire);

        let parsed: Role = serde_json::from_str(wire).unwrap();
        assert_eq!(parsed, role);
        assert_eq!(format!("\"{}\"", role.as_str()), wire);
    }

    #[test]
    fn test_role_rejects_unknown_value() {
        let result = serde_json::from_str::<Role>("\"SUPERUSER\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_checklist_status_wire_format() {
        let json = serde_json::to_string(&ChecklistStatus::NotStarted).unwrap();
        assert_eq!(json, "\"NOT_STARTED\"");
    }
}
