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

//! Invocation context for the NZBGet post-processing hook.
//!
//! Layout: `keys.rs` (host key names), `source.rs` (`OptionSource` and its
//! process/in-memory implementations), `model.rs` (typed options, command, and
//! download report), `loader.rs` (ordered precondition checks), `error.rs`.

pub mod error;
pub mod keys;
pub mod loader;
pub mod model;
pub mod source;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_invocation, load_options, parse_command, verify_host};
pub use model::{
    DownloadReport, HookCommand, HookOptions, Invocation, ParStatus, TotalStatus, UnpackStatus,
};
pub use source::{MapSource, OptionSource, ProcessEnv};
