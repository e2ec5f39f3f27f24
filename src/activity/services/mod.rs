//! Application services for the activity feed.

mod paginator;

pub use paginator::{ActivityPaginator, LoadOutcome, LoadRequest, PaginatorError, SkipReason};
