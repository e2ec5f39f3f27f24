//! Progress counters derived from a task collection.

use super::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate progress counters for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    /// Number of live tasks.
    pub total: u32,
    /// Number of tasks in a completed status.
    pub completed: u32,
    /// Number of tasks not yet completed.
    pub pending: u32,
    /// Completion percentage, rounded half up, in `0..=100`.
    pub progress_percent: u32,
}

impl ProjectStats {
    /// Builds counters from totals, deriving `pending` and the percentage.
    ///
    /// `completed` is clamped to `total`.
    #[must_use]
    pub fn from_counts(total: u32, completed: u32) -> Self {
        let capped = completed.min(total);
        Self {
            total,
            completed: capped,
            pending: total - capped,
            progress_percent: progress_percent(total, capped),
        }
    }

    /// Counts a task snapshot locally.
    ///
    /// This is the optimistic estimate published before the remote system
    /// answers.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard::board::domain::{CanonicalStatus, ProjectStats, Task, TaskId};
    ///
    /// let tasks: Vec<Task> = [
    ///     CanonicalStatus::Todo,
    ///     CanonicalStatus::Todo,
    ///     CanonicalStatus::InProgress,
    ///     CanonicalStatus::Done,
    /// ]
    /// .into_iter()
    /// .enumerate()
    /// .map(|(index, status)| {
    ///     let id = TaskId::new(format!("t{index}")).expect("valid id");
    ///     Task::new(id, "task", status)
    /// })
    /// .collect();
    ///
    /// let stats = ProjectStats::estimate(&tasks);
    /// assert_eq!(stats, ProjectStats { total: 4, completed: 1, pending: 3, progress_percent: 25 });
    /// ```
    #[must_use]
    pub fn estimate(tasks: &[Task]) -> Self {
        let total = saturating_count(tasks.len());
        let completed =
            saturating_count(tasks.iter().filter(|task| task.status().is_completed()).count());
        Self::from_counts(total, completed)
    }
}

/// Rounds `completed / total * 100` half up without floating point.
fn progress_percent(total: u32, completed: u32) -> u32 {
    let numerator = u64::from(completed) * 200 + u64::from(total);
    let percent = numerator
        .checked_div(u64::from(total) * 2)
        .unwrap_or_default();
    u32::try_from(percent).unwrap_or(100)
}

fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Where a published stats value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsOrigin {
    /// Counted locally from the task collection.
    Estimate,
    /// Computed by the remote system of record.
    Authoritative,
}

/// Published stats value with provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Counters.
    pub stats: ProjectStats,
    /// Provenance of the counters.
    pub origin: StatsOrigin,
    /// When the counters were published.
    pub computed_at: DateTime<Utc>,
}
