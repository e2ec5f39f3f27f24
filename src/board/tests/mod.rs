//! Unit tests for the board bounded context.

mod collection_tests;

use crate::board::domain::{CanonicalStatus, ProjectId, RawTask, Task, TaskId};

pub(super) fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

pub(super) fn project_id() -> ProjectId {
    ProjectId::new("proj-1").expect("valid project id")
}

pub(super) fn task(id: &str, status: CanonicalStatus) -> Task {
    Task::new(task_id(id), format!("Task {id}"), status)
}

pub(super) fn raw(id: &str, status: &str) -> RawTask {
    RawTask::new(id, format!("Task {id}"), status)
}
