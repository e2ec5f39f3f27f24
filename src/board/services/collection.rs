//! The in-memory task collection owned by a project board.
//!
//! Columns are never cached: each read filters the collection by status,
//! in insertion order. Move bookkeeping lives beside the tasks so a task
//! value compares equal regardless of how many moves it has seen.

use super::{BoardError, BoardResult};
use crate::board::domain::{
    BoardDomainError, CanonicalStatus, ColumnId, DropEvent, Ingested, QuarantinedTask,
    RemoteStatus, Task, TaskId,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Tasks displayed in one board column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    /// Column identifier.
    pub id: ColumnId,
    /// Tasks in display order.
    pub tasks: Vec<Task>,
}

/// An optimistic move awaiting remote confirmation.
///
/// Each command carries a per-task sequence number; only the newest
/// command for a task may confirm or roll back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    task_id: TaskId,
    sequence: u64,
    from_status: CanonicalStatus,
    to_status: CanonicalStatus,
}

impl MoveCommand {
    /// Returns the moved task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the command's sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the status before the move.
    #[must_use]
    pub const fn from_status(&self) -> CanonicalStatus {
        self.from_status
    }

    /// Returns the optimistic status.
    #[must_use]
    pub const fn to_status(&self) -> CanonicalStatus {
        self.to_status
    }
}

/// Result of resolving a move command against the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResolution {
    /// The command was still current and has been applied.
    Applied(Task),
    /// A newer command, reload, edit, or deletion replaced this one.
    Superseded,
}

/// Shared handle to a project's tasks.
///
/// Cloning the handle shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct TaskCollection {
    state: Arc<RwLock<CollectionState>>,
}

#[derive(Debug, Default)]
struct CollectionState {
    tasks: Vec<Task>,
    quarantined: Vec<QuarantinedTask>,
    pending_moves: HashMap<TaskId, PendingMove>,
    next_sequence: u64,
    revision: u64,
}

/// Latest unsettled move for a task.
///
/// Moves made while an earlier one is still in flight form a chain that
/// shares one rollback target: the last status the remote system is known
/// to hold.
#[derive(Debug, Clone, Copy)]
struct PendingMove {
    chain_start: u64,
    sequence: u64,
    restore_status: CanonicalStatus,
    restore_position: usize,
}

impl PendingMove {
    const fn precedes(&self, command: &MoveCommand) -> bool {
        command.sequence >= self.chain_start && command.sequence < self.sequence
    }
}

impl CollectionState {
    fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn is_current(&self, command: &MoveCommand) -> bool {
        self.pending_moves
            .get(&command.task_id)
            .is_some_and(|pending| pending.sequence == command.sequence)
    }

    fn pending_successor(&mut self, command: &MoveCommand) -> Option<&mut PendingMove> {
        self.pending_moves
            .get_mut(&command.task_id)
            .filter(|pending| pending.precedes(command))
    }

    /// Index in `tasks` at which a task lands when it becomes the
    /// `column_index`-th task of `status`.
    fn insertion_point(&self, status: CanonicalStatus, column_index: usize) -> usize {
        let mut members = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.status() == status)
            .map(|(index, _)| index);

        match members.nth(column_index) {
            Some(index) => index,
            None => self
                .tasks
                .iter()
                .rposition(|task| task.status() == status)
                .map_or(self.tasks.len(), |last| last + 1),
        }
    }
}

impl TaskCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> BoardResult<RwLockReadGuard<'_, CollectionState>> {
        self.state
            .read()
            .map_err(|err| BoardError::StatePoisoned(err.to_string()))
    }

    fn write(&self) -> BoardResult<RwLockWriteGuard<'_, CollectionState>> {
        self.state
            .write()
            .map_err(|err| BoardError::StatePoisoned(err.to_string()))
    }

    /// Replaces every task with a fresh ingestion result.
    ///
    /// Moves still awaiting the remote system are superseded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn replace_all(&self, ingested: Ingested) -> BoardResult<()> {
        let mut state = self.write()?;
        state.tasks = ingested.tasks;
        state.quarantined = ingested.quarantined;
        state.pending_moves.clear();
        state.touch();
        Ok(())
    }

    /// Returns a copy of every task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn snapshot(&self) -> BoardResult<Vec<Task>> {
        Ok(self.read()?.tasks.clone())
    }

    /// Returns the mutation counter. Unchanged counters imply unchanged
    /// contents.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn revision(&self) -> BoardResult<u64> {
        Ok(self.read()?.revision)
    }

    /// Returns the number of live tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn len(&self) -> BoardResult<usize> {
        Ok(self.read()?.tasks.len())
    }

    /// Returns `true` when the collection holds no live tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn is_empty(&self) -> BoardResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Looks up a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn get(&self, task_id: &TaskId) -> BoardResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .iter()
            .find(|task| task.id() == task_id)
            .cloned())
    }

    /// Returns the tasks displayed in a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn column(&self, column: ColumnId) -> BoardResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.column() == column)
            .cloned()
            .collect())
    }

    /// Returns all four columns in display order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn columns(&self) -> BoardResult<Vec<BoardColumn>> {
        let state = self.read()?;
        Ok(ColumnId::ALL
            .into_iter()
            .map(|id| BoardColumn {
                id,
                tasks: state
                    .tasks
                    .iter()
                    .filter(|task| task.column() == id)
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    /// Returns records held back from every column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn quarantined(&self) -> BoardResult<Vec<QuarantinedTask>> {
        Ok(self.read()?.quarantined.clone())
    }

    /// Inserts a task or fully replaces the task with the same identifier,
    /// keeping its position.
    ///
    /// A pending move for the task is superseded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn upsert(&self, task: Task) -> BoardResult<()> {
        let mut state = self.write()?;
        state.pending_moves.remove(task.id());
        state
            .quarantined
            .retain(|entry| entry.raw.id.trim() != task.id().as_str());
        match state.position(task.id()) {
            Some(index) => {
                if let Some(slot) = state.tasks.get_mut(index) {
                    *slot = task;
                }
            }
            None => state.tasks.push(task),
        }
        state.touch();
        Ok(())
    }

    /// Removes a task, returning it when present.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn remove(&self, task_id: &TaskId) -> BoardResult<Option<Task>> {
        let mut state = self.write()?;
        state.pending_moves.remove(task_id);
        let removed = state
            .position(task_id)
            .map(|index| state.tasks.remove(index));
        if removed.is_some() {
            state.touch();
        }
        Ok(removed)
    }

    /// Holds a record back from the board, removing any live task with the
    /// same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn quarantine(&self, entry: QuarantinedTask) -> BoardResult<()> {
        let mut state = self.write()?;
        let raw_id = entry.raw.id.trim().to_owned();
        state.tasks.retain(|task| task.id().as_str() != raw_id);
        state.pending_moves.retain(|task_id, _| task_id.as_str() != raw_id);
        state.quarantined.retain(|held| held.raw.id.trim() != raw_id);
        state.quarantined.push(entry);
        state.touch();
        Ok(())
    }

    /// Applies `update` to a task in place and returns the result.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownTask`] when the task is absent.
    pub fn update(&self, task_id: &TaskId, update: impl FnOnce(&mut Task)) -> BoardResult<Task> {
        let mut state = self.write()?;
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or_else(|| BoardDomainError::UnknownTask(task_id.clone()))?;
        update(task);
        let updated = task.clone();
        state.touch();
        Ok(updated)
    }

    /// Applies a drop optimistically.
    ///
    /// Returns `Ok(None)` without touching state when the task was dropped
    /// where it started.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownTask`] when the task is absent and
    /// [`BoardDomainError::StaleDrop`] when the task is not in the event's
    /// source column.
    pub fn begin_move(&self, event: &DropEvent) -> BoardResult<Option<MoveCommand>> {
        if event.is_noop() {
            return Ok(None);
        }

        let mut state = self.write()?;
        let prior_position = state
            .position(&event.task_id)
            .ok_or_else(|| BoardDomainError::UnknownTask(event.task_id.clone()))?;
        let mut task = state.tasks.remove(prior_position);

        let actual = task.column();
        if actual != event.source {
            state.tasks.insert(prior_position, task);
            return Err(BoardDomainError::StaleDrop {
                task_id: event.task_id.clone(),
                claimed: event.source,
                actual,
            }
            .into());
        }

        let from_status = task.status();
        let to_status = event.destination.status();
        task.set_status(to_status);
        let landing = state.insertion_point(to_status, event.destination_index);
        state.tasks.insert(landing, task);

        state.next_sequence += 1;
        let sequence = state.next_sequence;
        let pending = match state.pending_moves.get(&event.task_id) {
            Some(earlier) => PendingMove {
                sequence,
                ..*earlier
            },
            None => PendingMove {
                chain_start: sequence,
                sequence,
                restore_status: from_status,
                restore_position: prior_position,
            },
        };
        state.pending_moves.insert(event.task_id.clone(), pending);
        state.touch();

        Ok(Some(MoveCommand {
            task_id: event.task_id.clone(),
            sequence,
            from_status,
            to_status,
        }))
    }

    /// Records remote acknowledgement of a move.
    ///
    /// An acknowledgement that arrives after a newer move on the same task
    /// is not applied to the board, but it becomes that newer move's
    /// rollback target and updates the task's shadow status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn confirm_move(
        &self,
        command: &MoveCommand,
        remote_status: RemoteStatus,
    ) -> BoardResult<MoveResolution> {
        let mut state = self.write()?;
        if !state.is_current(command) {
            let Some(successor) = state.pending_successor(command) else {
                return Ok(MoveResolution::Superseded);
            };
            successor.chain_start = command.sequence + 1;
            successor.restore_status = command.to_status;
            if let Some(index) = state.position(&command.task_id)
                && let Some(task) = state.tasks.get_mut(index)
            {
                task.set_remote_status(remote_status);
            }
            state.touch();
            return Ok(MoveResolution::Superseded);
        }
        state.pending_moves.remove(&command.task_id);

        let Some(index) = state.position(&command.task_id) else {
            return Ok(MoveResolution::Superseded);
        };
        let confirmed = state.tasks.get_mut(index).map(|task| {
            task.set_remote_status(remote_status);
            task.clone()
        });
        state.touch();
        Ok(confirmed.map_or(MoveResolution::Superseded, MoveResolution::Applied))
    }

    /// Reverts a move to the last status the remote system is known to
    /// hold for the task.
    ///
    /// For a lone move this is the exact status and position it started
    /// from. A move made while an earlier one was in flight falls back to
    /// the status before that earlier move unless the earlier move was
    /// acknowledged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn rollback_move(&self, command: &MoveCommand) -> BoardResult<MoveResolution> {
        let mut state = self.write()?;
        let Some(pending) = state
            .pending_moves
            .get(&command.task_id)
            .filter(|pending| pending.sequence == command.sequence)
            .copied()
        else {
            return Ok(MoveResolution::Superseded);
        };
        state.pending_moves.remove(&command.task_id);

        let Some(index) = state.position(&command.task_id) else {
            return Ok(MoveResolution::Superseded);
        };
        let mut task = state.tasks.remove(index);
        task.set_status(pending.restore_status);
        let restored = task.clone();
        let position = pending.restore_position.min(state.tasks.len());
        state.tasks.insert(position, task);
        state.touch();
        Ok(MoveResolution::Applied(restored))
    }
}
