//! Relocation of a download directory into its destination.
//!
//! # Design
//! - One `rename` when source and target share a volume.
//! - Across volumes, copy the tree then remove the source. A failure between
//!   the two leaves both copies in place; nothing is rolled back.
//! - Never overwrite: an occupied target fails before anything is touched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{FsOpsError, FsOpsResult};

/// Seam between the decision pipeline and the filesystem mutation.
pub trait Transfer {
    /// Move the directory at `source` so that it lives at `target`.
    ///
    /// # Errors
    ///
    /// Returns an error when the target is occupied or the move fails.
    fn relocate(&self, source: &Path, target: &Path) -> FsOpsResult<()>;
}

/// Moves directories on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryMover;

impl Transfer for DirectoryMover {
    fn relocate(&self, source: &Path, target: &Path) -> FsOpsResult<()> {
        // `symlink_metadata` so a dangling symlink also counts as occupied.
        if target.symlink_metadata().is_ok() {
            return Err(FsOpsError::DestinationExists {
                path: target.to_path_buf(),
            });
        }

        match fs::rename(source, target) {
            Ok(()) => {
                debug!(source = %source.display(), target = %target.display(), "renamed directory");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
                info!(
                    source = %source.display(),
                    target = %target.display(),
                    "rename crosses devices; copying tree"
                );
                move_across_devices(source, target)
            }
            Err(err) => Err(FsOpsError::io("rename", source, err)),
        }
    }
}

/// Copy `source` to `target`, then remove `source`.
///
/// The source is only removed once the copy is complete; a failed copy leaves
/// it untouched alongside whatever part of the target was written.
pub(crate) fn move_across_devices(source: &Path, target: &Path) -> FsOpsResult<()> {
    copy_tree(source, target)?;
    fs::remove_dir_all(source)
        .map_err(|err| FsOpsError::io("remove source after copy", source, err))
}

/// Recursively copy `source` to a new directory at `destination`.
///
/// Symlinks are recreated rather than followed and permission bits are carried
/// over. Directory permissions are applied last so read-only directories can
/// still be populated.
pub(crate) fn copy_tree(source: &Path, destination: &Path) -> FsOpsResult<()> {
    let mut directories: Vec<(PathBuf, fs::Permissions)> = Vec::new();

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|err| FsOpsError::walkdir(source, err))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|err| FsOpsError::io("strip prefix", entry.path(), io::Error::other(err)))?;
        let target = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir(&target)
                .map_err(|err| FsOpsError::io("create directory", &target, err))?;
            let metadata = entry
                .metadata()
                .map_err(|err| FsOpsError::walkdir(source, err))?;
            directories.push((target, metadata.permissions()));
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|err| FsOpsError::io("copy file", entry.path(), err))?;
        }
    }

    for (directory, permissions) in directories.into_iter().rev() {
        fs::set_permissions(&directory, permissions)
            .map_err(|err| FsOpsError::io("set permissions", &directory, err))?;
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> FsOpsResult<()> {
    let pointee = fs::read_link(link).map_err(|err| FsOpsError::io("read link", link, err))?;
    std::os::unix::fs::symlink(&pointee, target)
        .map_err(|err| FsOpsError::io("create symlink", target, err))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> FsOpsResult<()> {
    fs::copy(link, target)
        .map(|_| ())
        .map_err(|err| FsOpsError::io("copy file", link, err))
}
