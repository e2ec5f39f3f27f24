//! Progress counters kept in step with the task collection.

use super::{BoardError, BoardResult};
use crate::board::{
    domain::{ProjectId, ProjectStats, StatsOrigin, StatsSnapshot, Task},
    ports::{GatewayResult, ProjectStatsSource},
};
use mockable::Clock;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Publishes project progress counters.
///
/// Every recompute publishes a local estimate first and then overwrites it
/// with the remote answer when that arrives. Remote answers always win,
/// even over an estimate published after the request was sent.
pub struct StatsAggregator<S, C>
where
    S: ProjectStatsSource,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    clock: Arc<C>,
    current: RwLock<StatsSnapshot>,
}

impl<S, C> StatsAggregator<S, C>
where
    S: ProjectStatsSource,
    C: Clock + Send + Sync,
{
    /// Creates an aggregator publishing zeroed estimates.
    #[must_use]
    pub fn new(source: Arc<S>, clock: Arc<C>) -> Self {
        let initial = StatsSnapshot {
            stats: ProjectStats::default(),
            origin: StatsOrigin::Estimate,
            computed_at: clock.utc(),
        };
        Self {
            source,
            clock,
            current: RwLock::new(initial),
        }
    }

    /// Counts a task snapshot locally.
    #[must_use]
    pub fn estimate(tasks: &[Task]) -> ProjectStats {
        ProjectStats::estimate(tasks)
    }

    /// Fetches counters from the remote system without publishing them.
    ///
    /// # Errors
    ///
    /// Returns the port error when the remote call fails.
    pub async fn fetch_authoritative(&self, project_id: &ProjectId) -> GatewayResult<ProjectStats> {
        self.source.fetch_stats(project_id).await
    }

    /// Returns the most recently published counters.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn current(&self) -> BoardResult<StatsSnapshot> {
        self.current
            .read()
            .map(|snapshot| *snapshot)
            .map_err(|err| BoardError::StatePoisoned(err.to_string()))
    }

    /// Publishes a local estimate immediately.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub fn publish_estimate(&self, tasks: &[Task]) -> BoardResult<StatsSnapshot> {
        self.publish(Self::estimate(tasks), StatsOrigin::Estimate)
    }

    /// Publishes an estimate, then the authoritative counters.
    ///
    /// A failed remote fetch leaves the estimate in place.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StatePoisoned`] when the state lock is poisoned.
    pub async fn recompute(
        &self,
        project_id: &ProjectId,
        tasks: &[Task],
    ) -> BoardResult<StatsSnapshot> {
        let estimate = self.publish_estimate(tasks)?;
        match self.fetch_authoritative(project_id).await {
            Ok(stats) => {
                if stats != estimate.stats {
                    debug!(
                        project_id = %project_id,
                        estimated = ?estimate.stats,
                        authoritative = ?stats,
                        "authoritative stats differ from estimate"
                    );
                }
                self.publish(stats, StatsOrigin::Authoritative)
            }
            Err(err) => {
                warn!(project_id = %project_id, error = %err, "keeping estimated stats");
                self.current()
            }
        }
    }

    fn publish(&self, stats: ProjectStats, origin: StatsOrigin) -> BoardResult<StatsSnapshot> {
        let snapshot = StatsSnapshot {
            stats,
            origin,
            computed_at: self.clock.utc(),
        };
        let mut current = self
            .current
            .write()
            .map_err(|err| BoardError::StatePoisoned(err.to_string()))?;
        *current = snapshot;
        Ok(snapshot)
    }
}
