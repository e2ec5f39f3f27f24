//! Port for authoritative progress counters.

use super::GatewayResult;
use crate::board::domain::{ProjectId, ProjectStats};
use async_trait::async_trait;

/// Remote computation of project progress (`GET /projects/{id}/stats`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectStatsSource: Send + Sync {
    /// Fetches the authoritative counters for a project.
    async fn fetch_stats(&self, project_id: &ProjectId) -> GatewayResult<ProjectStats>;
}
