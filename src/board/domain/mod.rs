//! Domain model for the task board.
//!
//! Pure types and functions: status vocabularies, task records, ingestion
//! of raw remote records, drop events, and progress counters. Nothing here
//! performs I/O.

mod drop_event;
mod error;
mod ids;
mod ingest;
mod raw;
mod stats;
mod status;
mod task;

pub use drop_event::DropEvent;
pub use error::{BoardDomainError, ParseColumnError};
pub use ids::{ProjectId, TaskId};
pub use ingest::{Ingested, Normalized, QuarantineReason, QuarantinedTask, ingest, normalize};
pub use raw::RawTask;
pub use stats::{ProjectStats, StatsOrigin, StatsSnapshot};
pub use status::{CanonicalStatus, ColumnId, RemoteStatus, StatusMatch, StatusVocabulary};
pub use task::{Attachment, Comment, Priority, Task};
