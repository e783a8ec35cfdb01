/*
[INPUT]:  Task payloads and JWT authentication
[OUTPUT]: Task records with checklists, creation/disposition acknowledgements
[POS]:    HTTP layer - task endpoints (require JWT auth)
[UPDATE]: When adding new task endpoints or changing query parameters
*/

use reqwest::Method;

use crate::http::{DispoClient, Result};
use crate::types::{
    ApiMessage, ChecklistUpdateRequest, CreateTaskRequest, DispositionRequest, Role, Task,
    TaskPage,
};

impl DispoClient {
    /// List tasks visible to the signed-in user
    ///
    /// GET /tasks
    pub async fn get_tasks(&self) -> Result<TaskPage> {
        self.authed_get("/tasks").await
    }

    /// List draft tasks awaiting disposition (leader view)
    ///
    /// GET /tasks/drafts
    pub async fn get_draft_tasks(&self) -> Result<TaskPage> {
        self.authed_get("/tasks/drafts").await
    }

    /// List tasks assigned to one section
    ///
    /// GET /tasks/by-section/{role}
    pub async fn get_tasks_by_section(&self, section: Role) -> Result<TaskPage> {
        let endpoint = format!("/tasks/by-section/{}", section.as_str());
        self.authed_get(&endpoint).await
    }

    /// Fetch a single task with its ordered checklist
    ///
    /// GET /tasks/{taskId}
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        let endpoint = format!("/tasks/{}", task_id);
        self.authed_get(&endpoint).await
    }

    /// Create a draft task with its checklist stages
    ///
    /// POST /tasks
    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<ApiMessage> {
        self.authed_ack(Method::POST, "/tasks", Some(request)).await
    }

    /// Disposition a draft task to a section
    ///
    /// POST /tasks/{taskId}/disposition
    pub async fn disposition_task(
        &self,
        task_id: &str,
        request: &DispositionRequest,
    ) -> Result<ApiMessage> {
        let endpoint = format!("/tasks/{}/disposition", task_id);
        self.authed_ack(Method::POST, &endpoint, Some(request)).await
    }

    /// Submit one checklist transition.
    ///
    /// PATCH /tasks/{taskId}/checklist/{itemId}
    ///
    /// The server is the sole authority for persisting the transition;
    /// callers re-fetch the task after a confirmed update.
    pub async fn update_checklist_item(
        &self,
        task_id: &str,
        item_id: &str,
        request: &ChecklistUpdateRequest,
    ) -> Result<ApiMessage> {
        let endpoint = format!("/tasks/{}/checklist/{}", task_id, item_id);
        self.authed_ack(Method::PATCH, &endpoint, Some(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{ClientConfig, DispoError};
    use crate::types::ChecklistStatus;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task_body(task_id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": task_id,
            "title": "Quarterly report",
            "description": "Compile the quarterly report",
            "status": "DISPOSITIONED",
            "priority": 3,
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
                "email": "staff@example.test",
                "role": "SECTION_OPERATIONS"
            },
            "assignedToRole": "SECTION_OPERATIONS",
            "startDate": null,
            "dueDate": "2025-03-01T00:00:00Z",
            "completedAt": null,
            "createdAt": "2025-02-01T08:00:00Z",
            "updatedAt": "2025-02-01T08:00:00Z",
            "checklistItems": [
                {
                    "id": "item-1",
                    "taskId": task_id,
                    "title": "Collect data",
                    "description": "Pull the raw numbers",
                    "order": 1,
                    "status": "NOT_STARTED",
                    "startedAt": null,
                    "completedAt": null,
                    "blockedNote": null,
                    "createdAt": "2025-02-01T08:00:00Z",
                    "updatedAt": "2025-02-01T08:00:00Z"
                }
            ],
            "progress": {"total": 1, "completed": 0, "percentage": 0}
        })
    }

    fn authed_client(server: &MockServer) -> DispoClient {
        let client =
            DispoClient::with_config_and_base_url(ClientConfig::default(), &server.uri()).unwrap();
        client.tokens().set_tokens("access-token", "refresh-token");
        client
    }

    #[tokio::test]
    async fn test_get_task_sends_bearer_and_parses_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tasks/task-1"))
            .and(header("authorization", "Bearer access-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "message": "OK",
                "data": task_body("task-1"),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let task = client.get_task("task-1").await.expect("get_task failed");

        assert_eq!(task.id, "task-1");
        assert_eq!(task.checklist_items.len(), 1);
        assert_eq!(task.checklist_items[0].status, ChecklistStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_update_checklist_item_sends_payload() {
        let server = MockServer::start().await;

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

        let client = authed_client(&server);
        let ack = client
            .update_checklist_item(
                "task-1",
                "item-1",
                &ChecklistUpdateRequest {
                    status: ChecklistStatus::InProgress,
                    blocked_note: None,
                },
            )
            .await
            .expect("update failed");

        assert_eq!(ack.message, "Stage updated");
    }

    #[tokio::test]
    async fn test_get_task_maps_server_error_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tasks/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "success": false,
                "message": "Task not found",
            })))
            .mount(&server)
            .await;

        let client = authed_client(&server);
        let err = client.get_task("missing").await.unwrap_err();

        match err {
            DispoError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Task not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unauthenticated_call_fails_without_request() {
        let server = MockServer::start().await;
        let client =
            DispoClient::with_config_and_base_url(ClientConfig::default(), &server.uri()).unwrap();

        let err = client.get_tasks().await.unwrap_err();
        assert!(matches!(err, DispoError::NotAuthenticated));
    }
}
