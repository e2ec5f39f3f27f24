//! Project activity feed.
//!
//! Loads a project's activity in pages. Refreshing replaces what is held,
//! loading more appends, and at most one request is in flight at a time.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
