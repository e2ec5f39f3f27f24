//! Attachment uploads with bounded retry on rate limiting.

use super::{BoardError, TaskCollection};
use crate::board::{
    domain::{BoardDomainError, Task, TaskId},
    ports::{AttachmentStore, AttachmentUpload, GatewayError},
};
use crate::config::TrackerConfig;
use crate::retry::{Delay, RetryPolicy, retry_rate_limited};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors surfaced by attachment uploads.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// Upload input was invalid.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The storage service failed after the configured attempts.
    #[error("upload failed: {0}")]
    Upload(#[source] GatewayError),
    /// Board state could not be updated.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Uploads files and attaches them to tasks on the board.
pub struct AttachmentService<A, D>
where
    A: AttachmentStore,
    D: Delay,
{
    store: Arc<A>,
    delay: Arc<D>,
    collection: TaskCollection,
    policy: RetryPolicy,
}

impl<A, D> AttachmentService<A, D>
where
    A: AttachmentStore,
    D: Delay,
{
    /// Creates an upload service.
    #[must_use]
    pub const fn new(
        store: Arc<A>,
        delay: Arc<D>,
        collection: TaskCollection,
        config: &TrackerConfig,
    ) -> Self {
        Self {
            store,
            delay,
            collection,
            policy: config.upload_retry,
        }
    }

    /// Uploads a file and appends it to the task's attachments.
    ///
    /// Rate-limited attempts are retried per the configured policy.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentError::Domain`] for an unknown task or blank file
    /// name, and [`AttachmentError::Upload`] once retries are exhausted or
    /// the failure is not retryable.
    pub async fn upload(
        &self,
        task_id: &TaskId,
        upload: AttachmentUpload,
    ) -> Result<Task, AttachmentError> {
        if upload.file_name.trim().is_empty() {
            return Err(BoardDomainError::EmptyAttachmentName.into());
        }
        if self.collection.get(task_id)?.is_none() {
            return Err(BoardDomainError::UnknownTask(task_id.clone()).into());
        }

        let stored = retry_rate_limited(self.policy, &*self.delay, |_attempt| {
            self.store.upload(task_id, &upload)
        })
        .await
        .map_err(AttachmentError::Upload)?;

        info!(task_id = %task_id, file = %stored.name, "attachment uploaded");
        let task = self
            .collection
            .update(task_id, |task| task.push_attachment(stored))?;
        Ok(task)
    }
}
