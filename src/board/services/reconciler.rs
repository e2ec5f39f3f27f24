//! Drag-and-drop move protocol.
//!
//! A move is applied locally before the remote system hears about it, then
//! confirmed or rolled back when the remote call settles:
//!
//! ```text
//! Placed(from) --begin--> Moving(from, to) --ok--> Placed(to)
//!                                          \--err-> Placed(from)
//! ```
//!
//! [`BoardReconciler::begin`] is synchronous and never yields, so the
//! optimistic state is visible before any remote work starts. Each move is
//! versioned per task; a response belonging to an older move than the
//! task's latest one is discarded rather than applied.

use super::{BoardResult, MoveCommand, MoveResolution, StatsAggregator, TaskCollection};
use crate::board::{
    domain::{DropEvent, ProjectId, StatusVocabulary, Task},
    ports::{GatewayError, ProjectStatsSource, TaskGateway},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Final state of a drop once reconciliation completes.
#[derive(Debug, Clone)]
pub enum MoveOutcome {
    /// The task was dropped where it started; nothing happened.
    NoOp,
    /// The remote system accepted the move.
    Confirmed(Task),
    /// The remote call failed and the task was returned to its source
    /// column.
    RolledBack {
        /// Task after rollback.
        task: Task,
        /// Remote failure that caused the rollback.
        error: GatewayError,
    },
    /// A newer move, reload, edit, or deletion replaced this move before it
    /// settled; its response was discarded.
    Superseded,
}

/// Applies board moves against the task collection and the remote system.
pub struct BoardReconciler<G, S, C>
where
    G: TaskGateway,
    S: ProjectStatsSource,
    C: Clock + Send + Sync,
{
    project_id: ProjectId,
    collection: TaskCollection,
    gateway: Arc<G>,
    stats: Arc<StatsAggregator<S, C>>,
}

impl<G, S, C> BoardReconciler<G, S, C>
where
    G: TaskGateway,
    S: ProjectStatsSource,
    C: Clock + Send + Sync,
{
    /// Creates a reconciler for one project's collection.
    #[must_use]
    pub const fn new(
        project_id: ProjectId,
        collection: TaskCollection,
        gateway: Arc<G>,
        stats: Arc<StatsAggregator<S, C>>,
    ) -> Self {
        Self {
            project_id,
            collection,
            gateway,
            stats,
        }
    }

    /// Applies a drop locally and publishes a stats estimate.
    ///
    /// Returns `Ok(None)` for a drop that moved nothing; no state changes
    /// and no remote call follows.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the task is unknown or the drop was
    /// computed against a column the task has left.
    pub fn begin(&self, event: &DropEvent) -> BoardResult<Option<MoveCommand>> {
        let Some(command) = self.collection.begin_move(event)? else {
            debug!(task_id = %event.task_id, "drop did not move the task");
            return Ok(None);
        };

        info!(
            task_id = %command.task_id(),
            from = %command.from_status(),
            to = %command.to_status(),
            sequence = command.sequence(),
            "task moved optimistically"
        );
        self.stats.publish_estimate(&self.collection.snapshot()?)?;
        Ok(Some(command))
    }

    /// Sends a move to the remote system and settles it.
    ///
    /// Stats are recomputed whatever the result so any skew from the
    /// optimistic estimate is repaired.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::StatePoisoned`] when board state is
    /// unusable. Remote failures are reported through
    /// [`MoveOutcome::RolledBack`].
    pub async fn persist(&self, command: MoveCommand) -> BoardResult<MoveOutcome> {
        let remote_status = StatusVocabulary::to_remote(command.to_status());
        let outcome = match self
            .gateway
            .update_status(command.task_id(), remote_status)
            .await
        {
            Ok(_) => match self.collection.confirm_move(&command, remote_status)? {
                MoveResolution::Applied(task) => {
                    info!(task_id = %task.id(), status = %remote_status, "move confirmed");
                    MoveOutcome::Confirmed(task)
                }
                MoveResolution::Superseded => {
                    debug!(
                        task_id = %command.task_id(),
                        sequence = command.sequence(),
                        "discarding confirmation of superseded move"
                    );
                    MoveOutcome::Superseded
                }
            },
            Err(error) => match self.collection.rollback_move(&command)? {
                MoveResolution::Applied(task) => {
                    warn!(
                        task_id = %task.id(),
                        restored = %task.status(),
                        error = %error,
                        "move failed; rolled back"
                    );
                    MoveOutcome::RolledBack { task, error }
                }
                MoveResolution::Superseded => {
                    debug!(
                        task_id = %command.task_id(),
                        sequence = command.sequence(),
                        error = %error,
                        "discarding failure of superseded move"
                    );
                    MoveOutcome::Superseded
                }
            },
        };

        self.stats
            .recompute(&self.project_id, &self.collection.snapshot()?)
            .await?;
        Ok(outcome)
    }

    /// Runs the whole move protocol for one drop.
    ///
    /// # Errors
    ///
    /// See [`BoardReconciler::begin`] and [`BoardReconciler::persist`].
    pub async fn handle_drop(&self, event: &DropEvent) -> BoardResult<MoveOutcome> {
        match self.begin(event)? {
            Some(command) => self.persist(command).await,
            None => Ok(MoveOutcome::NoOp),
        }
    }
}
