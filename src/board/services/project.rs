//! The project board: sole owner of a project's task collection.
//!
//! Every change to the collection (loads, moves, and edits made by other
//! views) funnels through this type so there is one copy of the tasks and
//! stats are recomputed after each change.

use super::{
    AttachmentService, BoardColumn, BoardReconciler, BoardResult, MoveOutcome, StatsAggregator,
    TaskCollection,
};
use crate::board::{
    domain::{
        ColumnId, DropEvent, Normalized, ProjectId, QuarantinedTask, RawTask, StatsSnapshot, Task,
        TaskId, ingest, normalize,
    },
    ports::{AttachmentStore, ProjectStatsSource, TaskGateway},
};
use crate::config::TrackerConfig;
use crate::retry::Delay;
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Counts reported after loading a project's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    /// Tasks placed on the board.
    pub placed: usize,
    /// Records held back because their status matched no vocabulary.
    pub quarantined: usize,
    /// Records dropped because they were marked deleted.
    pub deleted: usize,
}

/// Board view over one project.
pub struct ProjectBoard<G, S, C>
where
    G: TaskGateway,
    S: ProjectStatsSource,
    C: Clock + Send + Sync,
{
    project_id: ProjectId,
    collection: TaskCollection,
    gateway: Arc<G>,
    stats: Arc<StatsAggregator<S, C>>,
    reconciler: BoardReconciler<G, S, C>,
}

impl<G, S, C> ProjectBoard<G, S, C>
where
    G: TaskGateway,
    S: ProjectStatsSource,
    C: Clock + Send + Sync,
{
    /// Creates an empty board for a project.
    #[must_use]
    pub fn new(project_id: ProjectId, gateway: Arc<G>, stats_source: Arc<S>, clock: Arc<C>) -> Self {
        let collection = TaskCollection::new();
        let stats = Arc::new(StatsAggregator::new(stats_source, clock));
        let reconciler = BoardReconciler::new(
            project_id.clone(),
            collection.clone(),
            Arc::clone(&gateway),
            Arc::clone(&stats),
        );
        Self {
            project_id,
            collection,
            gateway,
            stats,
            reconciler,
        }
    }

    /// Returns the project this board shows.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns a handle to the owned collection.
    ///
    /// The handle shares state with the board; mutate through the board's
    /// operations so stats stay in step.
    #[must_use]
    pub const fn collection(&self) -> &TaskCollection {
        &self.collection
    }

    /// Returns the move reconciler.
    #[must_use]
    pub const fn reconciler(&self) -> &BoardReconciler<G, S, C> {
        &self.reconciler
    }

    /// Fetches the project's tasks, replaces the collection, and recomputes
    /// stats.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Gateway`] when the task list cannot be
    /// fetched; the previous collection is kept.
    pub async fn load(&self) -> BoardResult<LoadSummary> {
        let raw_tasks = self.gateway.list_tasks(&self.project_id).await?;
        let ingested = ingest(&raw_tasks);
        let summary = LoadSummary {
            placed: ingested.tasks.len(),
            quarantined: ingested.quarantined.len(),
            deleted: ingested.deleted,
        };
        self.collection.replace_all(ingested)?;
        info!(
            project_id = %self.project_id,
            placed = summary.placed,
            quarantined = summary.quarantined,
            deleted = summary.deleted,
            "board loaded"
        );
        self.refresh_stats().await?;
        Ok(summary)
    }

    /// Returns all four columns.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::StatePoisoned`] when state is unusable.
    pub fn columns(&self) -> BoardResult<Vec<BoardColumn>> {
        self.collection.columns()
    }

    /// Returns the tasks in one column.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::StatePoisoned`] when state is unusable.
    pub fn column(&self, column: ColumnId) -> BoardResult<Vec<Task>> {
        self.collection.column(column)
    }

    /// Returns records held back from every column.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::StatePoisoned`] when state is unusable.
    pub fn quarantined(&self) -> BoardResult<Vec<QuarantinedTask>> {
        self.collection.quarantined()
    }

    /// Returns the latest published stats.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::StatePoisoned`] when state is unusable.
    pub fn stats(&self) -> BoardResult<StatsSnapshot> {
        self.stats.current()
    }

    /// Handles a drop from the board renderer.
    ///
    /// # Errors
    ///
    /// See [`BoardReconciler::handle_drop`].
    pub async fn handle_drop(&self, event: &DropEvent) -> BoardResult<MoveOutcome> {
        self.reconciler.handle_drop(event).await
    }

    /// Applies a task created elsewhere.
    ///
    /// Returns the placed task, or `None` when the record was deleted or
    /// quarantined.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::StatePoisoned`] when state is unusable.
    pub async fn apply_task_created(&self, raw: &RawTask) -> BoardResult<Option<Task>> {
        self.apply_raw(raw).await
    }

    /// Applies a full replacement of a task edited elsewhere.
    ///
    /// An edit that marks the task deleted removes it.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::StatePoisoned`] when state is unusable.
    pub async fn apply_task_edited(&self, raw: &RawTask) -> BoardResult<Option<Task>> {
        self.apply_raw(raw).await
    }

    /// Removes a task deleted elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::StatePoisoned`] when state is unusable.
    pub async fn apply_task_deleted(&self, task_id: &TaskId) -> BoardResult<Option<Task>> {
        let removed = self.collection.remove(task_id)?;
        self.refresh_stats().await?;
        Ok(removed)
    }

    /// Builds an upload service writing into this board's collection.
    #[must_use]
    pub fn attachments<A, D>(
        &self,
        store: Arc<A>,
        delay: Arc<D>,
        config: &TrackerConfig,
    ) -> AttachmentService<A, D>
    where
        A: AttachmentStore,
        D: Delay,
    {
        AttachmentService::new(store, delay, self.collection.clone(), config)
    }

    async fn apply_raw(&self, raw: &RawTask) -> BoardResult<Option<Task>> {
        let placed = match normalize(raw) {
            Normalized::Task(task) => {
                self.collection.upsert((*task).clone())?;
                Some(*task)
            }
            Normalized::Deleted => {
                if let Ok(task_id) = TaskId::new(raw.id.as_str()) {
                    self.collection.remove(&task_id)?;
                }
                None
            }
            Normalized::Quarantined(reason) => {
                self.collection.quarantine(QuarantinedTask {
                    raw: raw.clone(),
                    reason,
                })?;
                None
            }
        };
        self.refresh_stats().await?;
        Ok(placed)
    }

    async fn refresh_stats(&self) -> BoardResult<StatsSnapshot> {
        self.stats
            .recompute(&self.project_id, &self.collection.snapshot()?)
            .await
    }
}
