//! Domain models for relocating a completed download.
//!
//! # Design
//! - Paths inside `ResolvedPaths` are always canonical; construction goes
//!   through `resolve_paths` so comparisons are never fooled by symlinks.
//! - Placement is decided from those canonical paths alone, without touching
//!   the filesystem.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use crate::error::{FsOpsError, FsOpsResult};

/// Side of the move a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryRole {
    /// The completed download directory.
    Source,
    /// The category destination root.
    Destination,
}

impl DirectoryRole {
    /// Stable label used in traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
        }
    }
}

impl Display for DirectoryRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => formatter.write_str("Current destination"),
            Self::Destination => formatter.write_str("New destination"),
        }
    }
}

/// Canonical, verified endpoints of a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Canonical download directory.
    pub source: PathBuf,
    /// Canonical destination root.
    pub destination_root: PathBuf,
}

/// Where the download stands relative to its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The download already lives directly under the destination root.
    AlreadyInPlace,
    /// The download must move to `target`.
    Pending {
        /// Final path: destination root joined with the source's base name.
        target: PathBuf,
    },
}

impl ResolvedPaths {
    /// Decide whether a move is needed and, if so, where to.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::NoBaseName`] when the source is a filesystem root.
    pub fn placement(&self) -> FsOpsResult<Placement> {
        if self.source.parent() == Some(self.destination_root.as_path()) {
            return Ok(Placement::AlreadyInPlace);
        }
        let name = self
            .source
            .file_name()
            .ok_or_else(|| FsOpsError::NoBaseName {
                path: self.source.clone(),
            })?;
        Ok(Placement::Pending {
            target: self.destination_root.join(name),
        })
    }
}
