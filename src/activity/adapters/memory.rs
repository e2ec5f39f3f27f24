//! In-memory activity feed for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::activity::{
    domain::{ActivityPage, ActivityRecord},
    ports::{ActivityFeed, ActivityFeedError, ActivityFeedResult},
};
use crate::board::domain::ProjectId;

/// Thread-safe in-memory activity feed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityFeed {
    state: Arc<RwLock<FeedState>>,
}

#[derive(Debug, Default)]
struct FeedState {
    feeds: HashMap<ProjectId, Vec<ActivityRecord>>,
    failing_fetches: usize,
    fetch_calls: usize,
}

fn lock_error(err: impl std::fmt::Display) -> ActivityFeedError {
    ActivityFeedError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryActivityFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records to a project's feed.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityFeedError::Transport`] when the state lock is
    /// poisoned.
    pub fn extend(
        &self,
        project_id: &ProjectId,
        records: impl IntoIterator<Item = ActivityRecord>,
    ) -> ActivityFeedResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .feeds
            .entry(project_id.clone())
            .or_default()
            .extend(records);
        Ok(())
    }

    /// Makes the next `count` fetches fail.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityFeedError::Transport`] when the state lock is
    /// poisoned.
    pub fn fail_next_fetches(&self, count: usize) -> ActivityFeedResult<()> {
        self.state.write().map_err(lock_error)?.failing_fetches = count;
        Ok(())
    }

    /// Returns the number of fetches received.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityFeedError::Transport`] when the state lock is
    /// poisoned.
    pub fn fetch_calls(&self) -> ActivityFeedResult<usize> {
        Ok(self.state.read().map_err(lock_error)?.fetch_calls)
    }
}

#[async_trait]
impl ActivityFeed for InMemoryActivityFeed {
    async fn fetch_page(
        &self,
        project_id: &ProjectId,
        page: u32,
        limit: u32,
    ) -> ActivityFeedResult<ActivityPage> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.fetch_calls += 1;
        if state.failing_fetches > 0 {
            state.failing_fetches -= 1;
            return Err(ActivityFeedError::transport(std::io::Error::other(
                "injected activity failure",
            )));
        }

        let records = state
            .feeds
            .get(project_id)
            .ok_or_else(|| ActivityFeedError::ProjectNotFound(project_id.clone()))?;
        let page_size = usize::try_from(limit).unwrap_or(usize::MAX);
        let skip = usize::try_from(page.saturating_sub(1))
            .unwrap_or(usize::MAX)
            .saturating_mul(page_size);

        Ok(ActivityPage {
            activities: records.iter().skip(skip).take(page_size).cloned().collect(),
            total: u64::try_from(records.len()).unwrap_or(u64::MAX),
            page,
        })
    }
}
