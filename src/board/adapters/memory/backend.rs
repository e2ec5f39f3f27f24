//! In-memory stand-in for the remote system of record.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::board::{
    domain::{Attachment, ProjectId, ProjectStats, RawTask, RemoteStatus, TaskId, ingest},
    ports::{
        AttachmentStore, AttachmentUpload, GatewayError, GatewayResult, ProjectStatsSource,
        TaskGateway,
    },
};

/// Thread-safe in-memory backend implementing every board port.
///
/// Authoritative stats are computed from the backend's own records, so
/// they differ from the board's estimate whenever a move has not been
/// persisted. Failure injection hooks let tests exercise rollback and
/// retry paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectBackend {
    state: Arc<RwLock<BackendState>>,
}

#[derive(Debug, Default)]
struct BackendState {
    projects: HashMap<ProjectId, Vec<RawTask>>,
    failing_status_updates: usize,
    failing_stats_fetches: usize,
    rate_limited_uploads: usize,
    status_calls: Vec<(TaskId, RemoteStatus)>,
    stats_calls: usize,
    upload_calls: usize,
}

impl BackendState {
    fn find_task_mut(&mut self, task_id: &TaskId) -> Option<&mut RawTask> {
        self.projects
            .values_mut()
            .flat_map(|tasks| tasks.iter_mut())
            .find(|task| task.id == task_id.as_str())
    }
}

fn take_failure(counter: &mut usize) -> bool {
    if *counter == 0 {
        return false;
    }
    *counter = counter.saturating_sub(1);
    true
}

impl InMemoryProjectBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> GatewayResult<RwLockReadGuard<'_, BackendState>> {
        self.state
            .read()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> GatewayResult<RwLockWriteGuard<'_, BackendState>> {
        self.state
            .write()
            .map_err(|err| GatewayError::transport(std::io::Error::other(err.to_string())))
    }

    /// Replaces the records of a project.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn seed(
        &self,
        project_id: &ProjectId,
        tasks: impl IntoIterator<Item = RawTask>,
    ) -> GatewayResult<()> {
        let mut state = self.write()?;
        state
            .projects
            .insert(project_id.clone(), tasks.into_iter().collect());
        Ok(())
    }

    /// Returns a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn raw_task(&self, task_id: &TaskId) -> GatewayResult<Option<RawTask>> {
        let state = self.read()?;
        Ok(state
            .projects
            .values()
            .flat_map(|tasks| tasks.iter())
            .find(|task| task.id == task_id.as_str())
            .cloned())
    }

    /// Makes the next `count` status updates fail with a transport error.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn fail_next_status_updates(&self, count: usize) -> GatewayResult<()> {
        self.write()?.failing_status_updates = count;
        Ok(())
    }

    /// Makes the next `count` stats fetches fail with a transport error.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn fail_next_stats_fetches(&self, count: usize) -> GatewayResult<()> {
        self.write()?.failing_stats_fetches = count;
        Ok(())
    }

    /// Makes the next `count` uploads answer with a rate-limit error.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn rate_limit_next_uploads(&self, count: usize) -> GatewayResult<()> {
        self.write()?.rate_limited_uploads = count;
        Ok(())
    }

    /// Returns every status update received, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn status_calls(&self) -> GatewayResult<Vec<(TaskId, RemoteStatus)>> {
        Ok(self.read()?.status_calls.clone())
    }

    /// Returns the number of stats fetches received.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn stats_calls(&self) -> GatewayResult<usize> {
        Ok(self.read()?.stats_calls)
    }

    /// Returns the number of upload attempts received.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] when the state lock is poisoned.
    pub fn upload_calls(&self) -> GatewayResult<usize> {
        Ok(self.read()?.upload_calls)
    }
}

#[async_trait]
impl TaskGateway for InMemoryProjectBackend {
    async fn list_tasks(&self, project_id: &ProjectId) -> GatewayResult<Vec<RawTask>> {
        let state = self.read()?;
        Ok(state.projects.get(project_id).cloned().unwrap_or_default())
    }

    async fn update_status(
        &self,
        task_id: &TaskId,
        status: RemoteStatus,
    ) -> GatewayResult<RawTask> {
        let mut state = self.write()?;
        state.status_calls.push((task_id.clone(), status));
        if take_failure(&mut state.failing_status_updates) {
            return Err(GatewayError::transport(std::io::Error::other(
                "injected status update failure",
            )));
        }

        let task = state
            .find_task_mut(task_id)
            .ok_or_else(|| GatewayError::NotFound(task_id.clone()))?;
        task.status = Some(status.as_str().to_owned());
        task.remote_status = Some(status.as_str().to_owned());
        Ok(task.clone())
    }
}

#[async_trait]
impl ProjectStatsSource for InMemoryProjectBackend {
    async fn fetch_stats(&self, project_id: &ProjectId) -> GatewayResult<ProjectStats> {
        let mut state = self.write()?;
        state.stats_calls += 1;
        if take_failure(&mut state.failing_stats_fetches) {
            return Err(GatewayError::transport(std::io::Error::other(
                "injected stats failure",
            )));
        }

        let records = state.projects.get(project_id).cloned().unwrap_or_default();
        Ok(ProjectStats::estimate(&ingest(&records).tasks))
    }
}

#[async_trait]
impl AttachmentStore for InMemoryProjectBackend {
    async fn upload(
        &self,
        task_id: &TaskId,
        upload: &AttachmentUpload,
    ) -> GatewayResult<Attachment> {
        let mut state = self.write()?;
        state.upload_calls += 1;
        if take_failure(&mut state.rate_limited_uploads) {
            return Err(GatewayError::RateLimited { retry_after: None });
        }

        let task = state
            .find_task_mut(task_id)
            .ok_or_else(|| GatewayError::NotFound(task_id.clone()))?;
        let attachment = Attachment {
            name: upload.file_name.clone(),
            url: format!("memory://tasks/{task_id}/{}", upload.file_name),
            size_bytes: u64::try_from(upload.bytes.len()).ok(),
        };
        task.attachments.push(attachment.clone());
        Ok(attachment)
    }
}
