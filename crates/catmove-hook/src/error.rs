//! # Design
//!
//! - One error type for everything that ends an invocation with exit code 94.
//! - Errors are logged once, by the protocol adapter; pipeline steps only return them.
//! - Status failures are collected, not short-circuited, so the operator sees every reason.

use catmove_config::ConfigError;
use catmove_fsops::FsOpsError;
use thiserror::Error;

use crate::protocol::ExitStatus;
use crate::status::StatusFailure;

/// Result alias for hook operations.
pub type HookResult<T> = Result<T, HookError>;

/// Reasons an invocation ends in failure.
#[derive(Debug, Error)]
pub enum HookError {
    /// Invocation context was unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// NZBGet reported a failed download, repair, or unpack.
    #[error("{} status check(s) failed", .failures.len())]
    StatusCheck {
        /// Every failed check, in evaluation order.
        failures: Vec<StatusFailure>,
    },
    /// A directory taking part in the move is missing or unreadable.
    #[error(transparent)]
    Precondition(FsOpsError),
    /// The move itself failed.
    #[error("Failed to move download directory: {0}")]
    Move(#[source] FsOpsError),
}

impl HookError {
    /// Host log lines describing the failure, one per reason.
    #[must_use]
    pub fn log_lines(&self) -> Vec<String> {
        match self {
            Self::StatusCheck { failures } => {
                failures.iter().map(ToString::to_string).collect()
            }
            other => vec![other.to_string()],
        }
    }

    /// Process exit status reported to NZBGet.
    #[must_use]
    pub const fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Config(_)
            | Self::StatusCheck { .. }
            | Self::Precondition(_)
            | Self::Move(_) => ExitStatus::Error,
        }
    }
}
