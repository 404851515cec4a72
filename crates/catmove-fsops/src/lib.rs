//! Filesystem side of the post-processing hook: resolving the download and
//! destination directories and relocating one into the other.
#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod model;
pub mod resolve;
pub mod transfer;

pub use error::{FsOpsError, FsOpsResult};
pub use model::{DirectoryRole, Placement, ResolvedPaths};
pub use resolve::{resolve_directory, resolve_paths};
pub use transfer::{DirectoryMover, Transfer};
