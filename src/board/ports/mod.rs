//! Port contracts for the remote system of record.
//!
//! Transport is an external concern; these traits describe only the
//! shapes the board depends on.

pub mod attachment_store;
mod error;
pub mod stats_source;
pub mod task_gateway;

pub use attachment_store::{AttachmentStore, AttachmentUpload};
pub use error::{GatewayError, GatewayResult};
pub use stats_source::ProjectStatsSource;
pub use task_gateway::TaskGateway;

#[cfg(test)]
pub use attachment_store::MockAttachmentStore;
#[cfg(test)]
pub use stats_source::MockProjectStatsSource;
#[cfg(test)]
pub use task_gateway::MockTaskGateway;
