//! Canonical resolution and existence guards for both ends of a move.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FsOpsError, FsOpsResult};
use crate::model::{DirectoryRole, ResolvedPaths};

/// Resolve `configured` to a canonical path and require it to be a directory.
///
/// Absent paths, dangling symlinks, paths running through a regular file, and
/// paths naming a non-directory are all reported as a missing directory.
///
/// # Errors
///
/// Returns [`FsOpsError::MissingDirectory`] when no directory exists at the
/// path, or [`FsOpsError::Resolve`] when resolution fails for another reason
/// (for example, permissions).
pub fn resolve_directory(role: DirectoryRole, configured: &Path) -> FsOpsResult<PathBuf> {
    let missing = || FsOpsError::MissingDirectory {
        role,
        path: configured.to_path_buf(),
    };

    let canonical = match fs::canonicalize(configured) {
        Ok(canonical) => canonical,
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            return Err(missing());
        }
        Err(source) => {
            return Err(FsOpsError::Resolve {
                role,
                path: configured.to_path_buf(),
                source,
            });
        }
    };

    if !canonical.is_dir() {
        return Err(missing());
    }

    debug!(
        role = role.as_str(),
        configured = %configured.display(),
        canonical = %canonical.display(),
        "resolved directory"
    );
    Ok(canonical)
}

/// Resolve and verify both ends of a move, source first.
///
/// # Errors
///
/// Returns the first resolution failure; the destination is not inspected when
/// the source is already missing.
pub fn resolve_paths(source: &Path, destination_root: &Path) -> FsOpsResult<ResolvedPaths> {
    let source = resolve_directory(DirectoryRole::Source, source)?;
    let destination_root = resolve_directory(DirectoryRole::Destination, destination_root)?;
    Ok(ResolvedPaths {
        source,
        destination_root,
    })
}
