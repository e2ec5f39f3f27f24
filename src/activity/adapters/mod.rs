//! Adapter implementations for the activity feed port.

pub mod memory;
pub mod wire;
