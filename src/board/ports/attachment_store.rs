//! Port for the opaque file storage service.

use super::GatewayResult;
use crate::board::domain::{Attachment, TaskId};
use async_trait::async_trait;

/// File handed to the storage service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl AttachmentUpload {
    /// Creates an upload payload.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Storage for task attachments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Stores a file against a task and returns the stored attachment.
    ///
    /// # Errors
    ///
    /// Returns [`super::GatewayError::RateLimited`] when the service is
    /// throttling uploads; callers may retry.
    async fn upload(
        &self,
        task_id: &TaskId,
        upload: &AttachmentUpload,
    ) -> GatewayResult<Attachment>;
}
