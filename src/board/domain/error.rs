//! Error types for board domain validation and parsing.

use super::{ColumnId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A task identifier was blank.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// A project identifier was blank.
    #[error("project identifier must not be empty")]
    EmptyProjectId,

    /// An attachment upload carried no file name.
    #[error("attachment file name must not be empty")]
    EmptyAttachmentName,

    /// A task with this identifier is not part of the collection.
    #[error("task not found on the board: {0}")]
    UnknownTask(TaskId),

    /// A drop event was computed against a column the task no longer
    /// occupies.
    #[error("task {task_id} is in column {actual}, not {claimed}")]
    StaleDrop {
        /// Task being dragged.
        task_id: TaskId,
        /// Column reported by the drop event.
        claimed: ColumnId,
        /// Column the task currently occupies.
        actual: ColumnId,
    },
}

/// Error returned while parsing column identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown board column: {0}")]
pub struct ParseColumnError(pub String);
