/*
[INPUT]:  Mock service responses and a signed-in session
[OUTPUT]: Test results for the guard-submit-refetch flow
[POS]:    Integration tests - task flow service
[UPDATE]: When the flow or checklist endpoints change
*/

use dispo_adapter::types::{ChecklistStatus, Role, SessionUser};
use dispo_adapter::{ClientConfig, DispoClient, Session};
use dispo_workflow::checklist::{ChecklistAction, ChecklistError};
use dispo_workflow::compute_progress;
use dispo_workflow::flow::{FlowError, TaskFlow};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn staff_user(id: &str) -> SessionUser {
    SessionUser {
        id: id.to_string(),
        username: format!("{id}.user"),
        email: format!("{id}@example.test"),
        name: id.to_string(),
        role: Role::SectionOperations,
    }
}

fn item_json(id: &str, order: u32, status: &str, started_at: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "taskId": "task-1",
        "title": format!("Stage {order}"),
        "description": "",
        "order": order,
        "status": status,
        "startedAt": started_at,
        "completedAt": null,
        "blockedNote": null,
        "createdAt": "2025-02-01T08:00:00Z",
        "updatedAt": "2025-02-01T08:00:00Z"
    })
}

fn task_json(items: Vec<serde_json::Value>) -> serde_json::Value {
    let total = items.len();
    serde_json::json!({
        "id": "task-1",
        "title": "Quarterly report",
        "description": "Compile the quarterly report",
        "status": "IN_PROGRESS",
        "priority": 2,
        "creatorId": "leader-1",
        "creator": {
            "id": "leader-1",
            "name": "Leader One",
            "email": "leader@example.test",
            "role": "LEADER"
        },
        "assignedToId": "staff-1",
        "assignedTo": {
            "id": "staff-1",
            "name": "Staff One",
            "email": "staff-1@example.test",
            "role": "SECTION_OPERATIONS"
        },
        "assignedToRole": "SECTION_OPERATIONS",
        "startDate": null,
        "dueDate": "2025-03-01T00:00:00Z",
        "completedAt": null,
        "createdAt": "2025-02-01T08:00:00Z",
        "updatedAt": "2025-02-01T08:00:00Z",
        "checklistItems": items,
        "progress": {"total": total, "completed": 0, "percentage": 0}
    })
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({"success": true, "message": "OK", "data": data})
}

async fn flow_for(server: &MockServer, user: Option<SessionUser>) -> TaskFlow {
    let client =
        DispoClient::with_config_and_base_url(ClientConfig::default(), &server.uri()).unwrap();
    client.tokens().set_tokens("access-token", "refresh-token");

    let session = Session::new();
    if let Some(user) = user {
        session.set_user(user);
    }
    TaskFlow::new(client, session)
}

#[tokio::test]
async fn start_submits_update_then_refetches() {
    let server = MockServer::start().await;

    // Initial fetch; expires after one match so the re-fetch below sees the
    // refreshed representation
    Mock::given(method("GET"))
        .and(path("/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(task_json(vec![
            item_json("item-1", 1, "NOT_STARTED", None),
            item_json("item-2", 2, "NOT_STARTED", None),
        ]))))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let flow = flow_for(&server, Some(staff_user("staff-1"))).await;
    let task = flow.load_task("task-1").await.unwrap();

    // After the PATCH, the re-fetch returns the server's new representation
    let refreshed = task_json(vec![
        item_json("item-1", 1, "IN_PROGRESS", Some("2025-02-02T09:00:00Z")),
        item_json("item-2", 2, "NOT_STARTED", None),
    ]);

    Mock::given(method("PATCH"))
        .and(path("/tasks/task-1/checklist/item-1"))
        .and(body_json(serde_json::json!({"status": "IN_PROGRESS"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Stage updated",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(refreshed)))
        .expect(1)
        .mount(&server)
        .await;

    let updated = flow
        .act(&task, "item-1", ChecklistAction::Start)
        .await
        .unwrap();

    assert_eq!(
        updated.checklist_items[0].status,
        ChecklistStatus::InProgress
    );
    assert!(updated.checklist_items[0].started_at.is_some());
    assert_eq!(compute_progress(&updated.checklist_items).total, 2);
}

#[tokio::test]
async fn guard_violation_issues_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(task_json(vec![
            item_json("item-1", 1, "NOT_STARTED", None),
        ]))))
        .mount(&server)
        .await;

    // Any write reaching the server fails the test
    Mock::given(method("PATCH"))
        .and(path("/tasks/task-1/checklist/item-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let flow = flow_for(&server, Some(staff_user("staff-2"))).await;
    let task = flow.load_task("task-1").await.unwrap();

    let err = flow
        .act(&task, "item-1", ChecklistAction::Start)
        .await
        .unwrap_err();

    match err {
        FlowError::Guard(ChecklistError::NotAssignee) => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn blank_block_note_is_rejected_locally() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(task_json(vec![
            item_json("item-1", 1, "IN_PROGRESS", Some("2025-02-02T09:00:00Z")),
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/tasks/task-1/checklist/item-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let flow = flow_for(&server, Some(staff_user("staff-1"))).await;
    let task = flow.load_task("task-1").await.unwrap();

    let err = flow
        .act(
            &task,
            "item-1",
            ChecklistAction::Block {
                note: "   ".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        FlowError::Guard(ChecklistError::EmptyBlockedNote)
    ));
}

#[tokio::test]
async fn service_failure_is_surfaced_without_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(task_json(vec![
            item_json("item-1", 1, "NOT_STARTED", None),
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/tasks/task-1/checklist/item-1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "success": false,
            "message": "Database unavailable",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flow = flow_for(&server, Some(staff_user("staff-1"))).await;
    let task = flow.load_task("task-1").await.unwrap();

    let err = flow
        .act(&task, "item-1", ChecklistAction::Start)
        .await
        .unwrap_err();

    match err {
        FlowError::Service(service_err) => assert!(service_err.is_retryable()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn acting_without_session_fails_fast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/task-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(task_json(vec![
            item_json("item-1", 1, "NOT_STARTED", None),
        ]))))
        .mount(&server)
        .await;

    let flow = flow_for(&server, None).await;
    let task = flow.load_task("task-1").await.unwrap();

    let err = flow
        .act(&task, "item-1", ChecklistAction::Start)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::NoSession));
}
