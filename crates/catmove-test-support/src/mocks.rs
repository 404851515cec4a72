//! Fake collaborators for pipeline tests.

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use catmove_fsops::{FsOpsError, FsOpsResult, Transfer};

/// `Transfer` that records calls instead of touching the filesystem.
#[derive(Debug, Default)]
pub struct RecordingTransfer {
    calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    failure: Option<io::ErrorKind>,
}

impl RecordingTransfer {
    /// A transfer that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A transfer that records the call, then fails with `kind`.
    #[must_use]
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            calls: RefCell::default(),
            failure: Some(kind),
        }
    }

    /// `(source, target)` pairs received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.borrow().clone()
    }
}

impl Transfer for RecordingTransfer {
    fn relocate(&self, source: &Path, target: &Path) -> FsOpsResult<()> {
        self.calls
            .borrow_mut()
            .push((source.to_path_buf(), target.to_path_buf()));
        match self.failure {
            Some(kind) => Err(FsOpsError::Io {
                operation: "rename",
                path: source.to_path_buf(),
                source: io::Error::from(kind),
            }),
            None => Ok(()),
        }
    }
}
