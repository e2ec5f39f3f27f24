//! Application services for the task board.

mod attachments;
mod collection;
mod error;
mod project;
mod reconciler;
mod stats;

pub use attachments::{AttachmentError, AttachmentService};
pub use collection::{BoardColumn, MoveCommand, MoveResolution, TaskCollection};
pub use error::{BoardError, BoardResult};
pub use project::{LoadSummary, ProjectBoard};
pub use reconciler::{BoardReconciler, MoveOutcome};
pub use stats::StatsAggregator;
