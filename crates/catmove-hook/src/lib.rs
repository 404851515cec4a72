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

//! NZBGet post-processing hook that moves a completed download into the
//! directory configured for its category.
//!
//! Layout: `pipeline.rs` (named decision steps), `status.rs` (download status
//! checks), `protocol.rs` (exit codes and host output), `manifest.rs`
//! (extension manifest), `cli.rs` (binary entry point), `error.rs`.

pub mod cli;
pub mod error;
pub mod manifest;
pub mod pipeline;
pub mod protocol;
pub mod status;

pub use cli::run;
pub use error::{HookError, HookResult};
pub use pipeline::{Outcome, StepKind};
pub use protocol::{ExitStatus, execute};
pub use status::{StatusCheck, StatusFailure, check_status};
