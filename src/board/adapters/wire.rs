//! Wire shapes and routes of the remote REST contract.
//!
//! Field names of the stats payload are part of the existing contract and
//! are kept as the remote system spells them.

use crate::board::domain::{
    Ingested, ProjectId, ProjectStats, QuarantineReason, QuarantinedTask, RawTask, RemoteStatus,
    TaskId, ingest,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Route builders for the board endpoints.
pub mod routes {
    use super::{ProjectId, TaskId};

    /// `GET /projects/{id}/tasks`
    #[must_use]
    pub fn project_tasks(project_id: &ProjectId) -> String {
        format!("/projects/{project_id}/tasks")
    }

    /// `PATCH /tasks/{id}/status`
    #[must_use]
    pub fn task_status(task_id: &TaskId) -> String {
        format!("/tasks/{task_id}/status")
    }

    /// `GET /projects/{id}/stats`
    #[must_use]
    pub fn project_stats(project_id: &ProjectId) -> String {
        format!("/projects/{project_id}/stats")
    }
}

/// Body of a status-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeBody {
    /// Target status in the remote vocabulary.
    pub status: RemoteStatus,
}

/// Authoritative counters as sent by the remote system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsPayload {
    /// Total live tasks.
    #[serde(rename = "totalTareas")]
    pub total_tareas: u32,
    /// Completed tasks.
    #[serde(rename = "tareasCompletadas")]
    pub tareas_completadas: u32,
    /// Pending tasks.
    #[serde(rename = "tareasPendientes")]
    pub tareas_pendientes: u32,
    /// Completion percentage.
    pub progreso: u32,
}

impl From<StatsPayload> for ProjectStats {
    fn from(payload: StatsPayload) -> Self {
        Self {
            total: payload.total_tareas,
            completed: payload.tareas_completadas,
            pending: payload.tareas_pendientes,
            progress_percent: payload.progreso,
        }
    }
}

impl From<ProjectStats> for StatsPayload {
    fn from(stats: ProjectStats) -> Self {
        Self {
            total_tareas: stats.total,
            tareas_completadas: stats.completed,
            tareas_pendientes: stats.pending,
            progreso: stats.progress_percent,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskListPayload {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(alias = "tareas")]
        tasks: Vec<Value>,
    },
}

/// Decoded task-list response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListBody {
    /// Records that decoded, in response order.
    pub records: Vec<RawTask>,
    /// Records that did not decode, with whatever identifier they carried.
    pub malformed: Vec<QuarantinedTask>,
}

impl TaskListBody {
    /// Ingests the decoded records, adding undecodable ones to the
    /// quarantine.
    #[must_use]
    pub fn ingest(self) -> Ingested {
        let mut ingested = ingest(&self.records);
        ingested.quarantined.extend(self.malformed);
        ingested
    }
}

/// Parses a task-list response body.
///
/// Accepts a bare array or an object wrapping the array under `tasks` or
/// `tareas`. Records are decoded one by one, so a record that does not
/// decode is held back without losing the rest of the list.
///
/// # Errors
///
/// Returns the JSON error when the body matches neither envelope.
pub fn parse_task_list(body: &str) -> serde_json::Result<TaskListBody> {
    let payload: TaskListPayload = serde_json::from_str(body)?;
    let (TaskListPayload::Bare(values) | TaskListPayload::Wrapped { tasks: values }) = payload;

    let mut list = TaskListBody::default();
    for value in values {
        let id = record_id(&value);
        match serde_json::from_value::<RawTask>(value) {
            Ok(record) => list.records.push(record),
            Err(err) => {
                warn!(task_id = %id, error = %err, "skipping undecodable task record");
                list.malformed.push(QuarantinedTask {
                    raw: RawTask {
                        id,
                        ..RawTask::default()
                    },
                    reason: QuarantineReason::Malformed(err.to_string()),
                });
            }
        }
    }
    Ok(list)
}

fn record_id(value: &Value) -> String {
    ["id", "_id"]
        .into_iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .unwrap_or_default()
        .to_owned()
}
