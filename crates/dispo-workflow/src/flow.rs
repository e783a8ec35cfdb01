/*
[INPUT]:  Validated checklist actions and the API client
[OUTPUT]: Server-confirmed task state after each transition
[POS]:    Task domain logic - bridges the progression rules to the service
[UPDATE]: When the submit/re-fetch flow or error split changes
*/

use thiserror::Error;
use tracing::info;

use dispo_adapter::types::Task;
use dispo_adapter::{DispoClient, DispoError, Session};

use crate::checklist::{self, ChecklistAction, ChecklistError};

/// Failures of a checklist operation, split by origin: guard violations are
/// local and never touched the network; service errors did, and say nothing
/// about whether the transition was persisted.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("no signed-in user")]
    NoSession,

    #[error(transparent)]
    Guard(#[from] ChecklistError),

    #[error(transparent)]
    Service(#[from] DispoError),
}

/// Runs checklist transitions end to end: guard locally, submit one atomic
/// update, then re-fetch the task so the server's representation replaces
/// the local one. The flow never mutates its input optimistically; with no
/// rollback path, the re-fetch is the only way state changes.
#[derive(Debug, Clone)]
pub struct TaskFlow {
    client: DispoClient,
    session: Session,
}

impl TaskFlow {
    pub fn new(client: DispoClient, session: Session) -> Self {
        Self { client, session }
    }

    /// The underlying API client
    pub fn client(&self) -> &DispoClient {
        &self.client
    }

    /// Fetch a task with its checklist
    pub async fn load_task(&self, task_id: &str) -> Result<Task, FlowError> {
        Ok(self.client.get_task(task_id).await?)
    }

    /// Run one checklist action against a task.
    ///
    /// Returns the refreshed task on success. Sequential use only: callers
    /// act on the returned task, not on the stale input.
    pub async fn act(
        &self,
        task: &Task,
        item_id: &str,
        action: ChecklistAction,
    ) -> Result<Task, FlowError> {
        let actor = self.session.current_user().ok_or(FlowError::NoSession)?;

        let update = checklist::plan_action(task, &actor, item_id, &action)?;
        let request = update.clone().into_request();

        self.client
            .update_checklist_item(&task.id, &update.item_id, &request)
            .await?;

        info!(
            task_id = %task.id,
            item_id = %update.item_id,
            status = ?update.status,
            "checklist stage updated"
        );

        Ok(self.client.get_task(&task.id).await?)
    }
}
