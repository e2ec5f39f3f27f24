//! Service-level errors for board orchestration.

use crate::board::{domain::BoardDomainError, ports::GatewayError};
use thiserror::Error;

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// A remote call failed where no local recovery applies.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// A panic while holding board state left it unusable.
    #[error("board state lock poisoned: {0}")]
    StatePoisoned(String),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;
