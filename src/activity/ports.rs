//! Port for the remote activity feed.

use super::domain::ActivityPage;
use crate::board::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for activity feed operations.
pub type ActivityFeedResult<T> = Result<T, ActivityFeedError>;

/// Paged access to a project's activity (`GET /projects/{id}/activity`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityFeed: Send + Sync {
    /// Fetches one page of activity.
    async fn fetch_page(
        &self,
        project_id: &ProjectId,
        page: u32,
        limit: u32,
    ) -> ActivityFeedResult<ActivityPage>;
}

/// Errors returned by activity feed adapters.
#[derive(Debug, Clone, Error)]
pub enum ActivityFeedError {
    /// The project does not exist remotely.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The request never completed.
    #[error("activity feed transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityFeedError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
