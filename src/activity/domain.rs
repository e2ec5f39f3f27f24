//! Activity feed records and pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a project's activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Remote identifier.
    #[serde(alias = "_id")]
    pub id: String,
    /// Kind of action, such as `task_moved`.
    #[serde(alias = "accion")]
    pub action: String,
    /// Human-readable summary.
    #[serde(default, alias = "descripcion")]
    pub description: String,
    /// User who performed the action, when known.
    #[serde(default, alias = "usuario", skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    /// When the action happened.
    #[serde(alias = "fecha")]
    pub created_at: DateTime<Utc>,
}

/// A page of activity records with the feed's total size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPage {
    /// Records in feed order.
    pub activities: Vec<ActivityRecord>,
    /// Total number of records in the feed.
    pub total: u64,
    /// 1-based page number; zero when nothing has been loaded.
    pub page: u32,
}

impl ActivityPage {
    /// Returns `true` while fewer records are held than the feed contains.
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::try_from(self.activities.len()).is_ok_and(|held| held < self.total)
    }
}
