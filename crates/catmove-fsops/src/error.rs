//! # Design
//!
//! - Messages end up verbatim in the NZBGet log, so they carry the path and the
//!   underlying system error text.
//! - Precondition failures (missing directories) are distinct from failures
//!   during the move so callers can classify them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::DirectoryRole;

/// Result type for filesystem operations.
pub type FsOpsResult<T> = Result<T, FsOpsError>;

/// Errors produced while resolving or relocating directories.
#[derive(Debug, Error)]
pub enum FsOpsError {
    /// The configured path does not lead to an existing directory.
    #[error("{role} directory \"{}\" does not exist.", .path.display())]
    MissingDirectory {
        /// Which side of the move is missing.
        role: DirectoryRole,
        /// Path as configured by the host, before resolution.
        path: PathBuf,
    },
    /// Resolving the path to its canonical form failed for a reason other than absence.
    #[error("failed to resolve {role} directory \"{}\": {source}", .path.display())]
    Resolve {
        /// Which side of the move failed to resolve.
        role: DirectoryRole,
        /// Path as configured by the host.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The source directory has no final path component to carry over.
    #[error("cannot determine the directory name of \"{}\"", .path.display())]
    NoBaseName {
        /// Canonical source path.
        path: PathBuf,
    },
    /// Something already occupies the target path.
    #[error("Destination path \"{}\" already exists", .path.display())]
    DestinationExists {
        /// Target path that is occupied.
        path: PathBuf,
    },
    /// IO failure while moving or copying.
    #[error("{operation} \"{}\" failed: {source}", .path.display())]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Directory traversal failed while copying across devices.
    #[error("failed to walk \"{}\": {source}", .path.display())]
    Walkdir {
        /// Root of the traversal.
        path: PathBuf,
        /// Underlying walkdir error.
        source: walkdir::Error,
    },
}

impl FsOpsError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn walkdir(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Walkdir {
            path: path.into(),
            source,
        }
    }

    /// Whether the error is a failed precondition rather than a failed move.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingDirectory { .. } | Self::Resolve { .. })
    }
}
