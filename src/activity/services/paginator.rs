//! Incremental loading of a project's activity feed.

use crate::activity::{
    domain::{ActivityPage, ActivityRecord},
    ports::{ActivityFeed, ActivityFeedError},
};
use crate::board::domain::ProjectId;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tracing::{debug, warn};

/// Parameters of a page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    /// 1-based page to fetch. Ignored when `refresh` is set.
    pub page: u32,
    /// Records per page.
    pub limit: u32,
    /// Replace the held records with page one instead of appending.
    pub refresh: bool,
}

impl LoadRequest {
    /// Requests page one, replacing held records.
    #[must_use]
    pub const fn refresh(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            refresh: true,
        }
    }

    /// Requests a page to append to held records.
    #[must_use]
    pub const fn page(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            refresh: false,
        }
    }
}

/// Why a load request was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Another request is still pending.
    InFlight,
    /// Every record has already been loaded.
    Exhausted,
}

/// Result of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page arrived and was applied.
    Loaded {
        /// Records on the received page.
        received: usize,
        /// Total records in the feed.
        total: u64,
        /// Page number received.
        page: u32,
    },
    /// No request was sent.
    Skipped(SkipReason),
}

/// Errors surfaced by the paginator.
#[derive(Debug, Error)]
pub enum PaginatorError {
    /// The feed request failed. The loading guard has been released.
    #[error(transparent)]
    Feed(#[from] ActivityFeedError),
    /// A panic while holding paginator state left it unusable.
    #[error("paginator state lock poisoned: {0}")]
    StatePoisoned(String),
}

#[derive(Debug, Default)]
struct PaginatorState {
    page: ActivityPage,
    loading: bool,
}

/// Clears the loading flag when the in-flight request ends, including when
/// the load future is dropped before completing.
struct InFlight<'a> {
    state: &'a Mutex<PaginatorState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.loading = false;
        }
    }
}

/// Loads a project's activity in pages with at most one request in flight.
///
/// Refreshing replaces the held records; any other load appends.
pub struct ActivityPaginator<F: ActivityFeed> {
    project_id: ProjectId,
    feed: Arc<F>,
    state: Mutex<PaginatorState>,
}

impl<F: ActivityFeed> ActivityPaginator<F> {
    /// Creates a paginator holding no records.
    #[must_use]
    pub fn new(project_id: ProjectId, feed: Arc<F>) -> Self {
        Self {
            project_id,
            feed,
            state: Mutex::new(PaginatorState::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, PaginatorState>, PaginatorError> {
        self.state
            .lock()
            .map_err(|err| PaginatorError::StatePoisoned(err.to_string()))
    }

    /// Loads a page.
    ///
    /// Returns [`LoadOutcome::Skipped`] without contacting the feed when a
    /// request is already pending.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::Feed`] when the request fails. A failed
    /// refresh leaves no held records; a failed append keeps them.
    pub async fn load(&self, request: LoadRequest) -> Result<LoadOutcome, PaginatorError> {
        let page = if request.refresh { 1 } else { request.page.max(1) };
        {
            let mut state = self.lock()?;
            if state.loading {
                debug!(project_id = %self.project_id, page, "activity load already in flight");
                return Ok(LoadOutcome::Skipped(SkipReason::InFlight));
            }
            state.loading = true;
        }
        let _in_flight = InFlight { state: &self.state };

        let result = self
            .feed
            .fetch_page(&self.project_id, page, request.limit)
            .await;

        let mut state = self.lock()?;
        match result {
            Ok(received) => {
                let outcome = LoadOutcome::Loaded {
                    received: received.activities.len(),
                    total: received.total,
                    page: received.page,
                };
                if request.refresh {
                    state.page.activities = received.activities;
                } else {
                    state.page.activities.extend(received.activities);
                }
                state.page.total = received.total;
                state.page.page = received.page;
                Ok(outcome)
            }
            Err(err) => {
                warn!(project_id = %self.project_id, page, error = %err, "activity load failed");
                if request.refresh {
                    state.page = ActivityPage::default();
                }
                Err(err.into())
            }
        }
    }

    /// Reloads page one, replacing held records.
    ///
    /// # Errors
    ///
    /// See [`ActivityPaginator::load`].
    pub async fn refresh(&self, limit: u32) -> Result<LoadOutcome, PaginatorError> {
        self.load(LoadRequest::refresh(limit)).await
    }

    /// Appends the page after the last one loaded.
    ///
    /// Returns [`SkipReason::Exhausted`] once every record is held.
    ///
    /// # Errors
    ///
    /// See [`ActivityPaginator::load`].
    pub async fn load_more(&self, limit: u32) -> Result<LoadOutcome, PaginatorError> {
        let next_page = {
            let state = self.lock()?;
            if state.page.page > 0 && !state.page.has_more() {
                return Ok(LoadOutcome::Skipped(SkipReason::Exhausted));
            }
            state.page.page.saturating_add(1)
        };
        self.load(LoadRequest::page(next_page, limit)).await
    }

    /// Returns `true` while more records remain to be loaded.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::StatePoisoned`] when state is unusable.
    pub fn has_more(&self) -> Result<bool, PaginatorError> {
        Ok(self.lock()?.page.has_more())
    }

    /// Returns `true` while a request is pending.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::StatePoisoned`] when state is unusable.
    pub fn is_loading(&self) -> Result<bool, PaginatorError> {
        Ok(self.lock()?.loading)
    }

    /// Returns the held records.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::StatePoisoned`] when state is unusable.
    pub fn activities(&self) -> Result<Vec<ActivityRecord>, PaginatorError> {
        Ok(self.lock()?.page.activities.clone())
    }

    /// Returns the held records with the feed total and last page.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::StatePoisoned`] when state is unusable.
    pub fn snapshot(&self) -> Result<ActivityPage, PaginatorError> {
        Ok(self.lock()?.page.clone())
    }
}
