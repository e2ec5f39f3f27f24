//! Task board for a single project.
//!
//! Keeps three things consistent: the columns a user sees, the in-memory
//! task collection behind them, and the remote system of record. Statuses
//! arrive in several vocabularies and are normalized on ingestion; moves
//! are applied optimistically and rolled back when the remote system
//! refuses them; progress counters are estimated locally and then
//! replaced by the remote computation. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
