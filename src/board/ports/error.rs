//! Errors shared by the remote-system ports.

use crate::board::domain::TaskId;
use crate::retry::RateLimited;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for remote-system port operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors returned by remote-system adapters.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The remote system has no record of the task.
    #[error("remote task not found: {0}")]
    NotFound(TaskId),

    /// The remote system asked the caller to slow down.
    #[error("rate limited by the remote system")]
    RateLimited {
        /// Server-suggested wait, when provided.
        retry_after: Option<Duration>,
    },

    /// The remote system refused the request.
    #[error("remote system rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Server message.
        message: String,
    },

    /// The request never completed.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Builds the error for an HTTP-style status code.
    ///
    /// `429` maps to [`GatewayError::RateLimited`].
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == 429 {
            return Self::RateLimited { retry_after: None };
        }
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

impl RateLimited for GatewayError {
    fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
