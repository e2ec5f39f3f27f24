//! Normalization of raw remote records into board tasks.

use super::{Priority, RawTask, StatusMatch, Task, TaskId};
use tracing::{debug, warn};

/// Why a raw record was held back from the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuarantineReason {
    /// No vocabulary recognised the record's status.
    UnmatchedStatus(String),
    /// The record carried no usable identifier.
    MissingId,
    /// The record could not be decoded; carries the decoder's message.
    Malformed(String),
}

/// Raw record excluded from every column, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarantinedTask {
    /// The record as received.
    pub raw: RawTask,
    /// Why it was excluded.
    pub reason: QuarantineReason,
}

/// Result of ingesting a batch of raw records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingested {
    /// Live tasks in input order.
    pub tasks: Vec<Task>,
    /// Records that could not be placed on the board.
    pub quarantined: Vec<QuarantinedTask>,
    /// Number of records dropped because they were marked deleted.
    pub deleted: usize,
}

/// Normalizes raw records into tasks.
///
/// Deleted records are dropped, unmatched records are quarantined, and
/// everything else keeps input order. The function is pure: identical
/// input yields identical output.
#[must_use]
pub fn ingest(raw_tasks: &[RawTask]) -> Ingested {
    let mut ingested = Ingested::default();

    for raw in raw_tasks {
        match normalize(raw) {
            Normalized::Task(task) => ingested.tasks.push(*task),
            Normalized::Deleted => {
                debug!(task_id = %raw.id, "dropping deleted task");
                ingested.deleted += 1;
            }
            Normalized::Quarantined(reason) => {
                warn!(task_id = %raw.id, ?reason, "quarantining task with no board column");
                ingested.quarantined.push(QuarantinedTask {
                    raw: raw.clone(),
                    reason,
                });
            }
        }
    }

    ingested
}

/// Outcome of normalizing a single raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The record became a live task.
    Task(Box<Task>),
    /// The record is marked deleted.
    Deleted,
    /// The record cannot be placed on the board.
    Quarantined(QuarantineReason),
}

/// Normalizes a single raw record.
#[must_use]
pub fn normalize(raw: &RawTask) -> Normalized {
    let status = match raw.resolve_status() {
        StatusMatch::Active(status) => status,
        StatusMatch::Deleted => return Normalized::Deleted,
        StatusMatch::Unmatched => {
            return Normalized::Quarantined(QuarantineReason::UnmatchedStatus(
                raw.raw_status_label(),
            ));
        }
    };
    let Ok(id) = TaskId::new(raw.id.as_str()) else {
        return Normalized::Quarantined(QuarantineReason::MissingId);
    };

    let mut task = Task::new(id, raw.title.trim(), status)
        .with_priority(
            raw.priority
                .as_deref()
                .map(Priority::parse_lenient)
                .unwrap_or_default(),
        )
        .with_comments(raw.comments.iter().cloned())
        .with_attachments(raw.attachments.iter().cloned());
    if let Some(description) = raw.description.as_deref() {
        task = task.with_description(description);
    }
    if let Some(assignee) = raw.assignee.as_deref().filter(|value| !value.trim().is_empty()) {
        task = task.with_assignee(assignee.trim());
    }
    if let Some(due_date) = raw.parsed_due_date() {
        task = task.with_due_date(due_date);
    }

    Normalized::Task(Box::new(task))
}
