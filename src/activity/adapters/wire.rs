//! Route builder for the activity endpoint.

use crate::board::domain::ProjectId;

/// `GET /projects/{id}/activity?page=&limit=`
#[must_use]
pub fn project_activity(project_id: &ProjectId, page: u32, limit: u32) -> String {
    format!("/projects/{project_id}/activity?page={page}&limit={limit}")
}
