//! Drag-and-drop events emitted by the board renderer.

use super::{ColumnId, TaskId};

/// A task dropped by the user.
///
/// Drag libraries emit a drop even when nothing moved; see
/// [`DropEvent::is_noop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// Dragged task.
    pub task_id: TaskId,
    /// Column the drag started in.
    pub source: ColumnId,
    /// Column the task was dropped on.
    pub destination: ColumnId,
    /// Position within the source column.
    pub source_index: usize,
    /// Position within the destination column.
    pub destination_index: usize,
}

impl DropEvent {
    /// Creates a drop event for a task.
    #[must_use]
    pub const fn new(task_id: TaskId, source: ColumnId, destination: ColumnId) -> Self {
        Self {
            task_id,
            source,
            destination,
            source_index: 0,
            destination_index: 0,
        }
    }

    /// Sets the source and destination positions.
    #[must_use]
    pub const fn at(mut self, source_index: usize, destination_index: usize) -> Self {
        self.source_index = source_index;
        self.destination_index = destination_index;
        self
    }

    /// Returns `true` when the task was dropped where it started.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.source == self.destination && self.source_index == self.destination_index
    }
}
