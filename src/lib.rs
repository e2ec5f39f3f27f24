//! Taskboard: status reconciliation for a project task tracker.
//!
//! This crate keeps a project's kanban board consistent with a remote system
//! of record that speaks a different status vocabulary than older clients
//! and the board itself.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Status vocabulary, task records, and progress counters
//! - **Ports**: Abstract trait interfaces for the remote system
//! - **Adapters**: Wire shapes of the REST contract and in-memory backends
//! - **Services**: Board ownership, optimistic moves, and pagination
//!
//! # Modules
//!
//! - [`board`]: Task ingestion, board columns, moves, and stats
//! - [`activity`]: Paged loading of a project's activity feed
//! - [`config`]: Service tunables
//! - [`retry`]: Bounded retry for rate-limited calls

pub mod activity;
pub mod board;
pub mod config;
pub mod retry;
