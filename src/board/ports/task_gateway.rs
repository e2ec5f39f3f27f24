//! Port for reading and updating tasks in the remote system of record.

use super::GatewayResult;
use crate::board::domain::{ProjectId, RawTask, RemoteStatus, TaskId};
use async_trait::async_trait;

/// Task endpoints of the remote system.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Lists a project's tasks in mixed-vocabulary form
    /// (`GET /projects/{id}/tasks`).
    async fn list_tasks(&self, project_id: &ProjectId) -> GatewayResult<Vec<RawTask>>;

    /// Changes a task's status (`PATCH /tasks/{id}/status`).
    ///
    /// Returns the updated remote record.
    ///
    /// # Errors
    ///
    /// Returns [`super::GatewayError::NotFound`] when the task does not
    /// exist remotely, or any transport failure.
    async fn update_status(&self, task_id: &TaskId, status: RemoteStatus)
    -> GatewayResult<RawTask>;
}
