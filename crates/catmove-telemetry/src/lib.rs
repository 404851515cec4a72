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

//! Logging primitives for the catmove hook.
//!
//! NZBGet reads a script's standard output line by line and files each line
//! under the severity named in its `[TAG]` prefix. This crate installs a
//! `tracing` subscriber that renders events in that shape, so the rest of the
//! workspace logs with ordinary `tracing` macros.

pub mod error;
pub mod format;
pub mod init;

pub use error::{TelemetryError, TelemetryResult};
pub use format::{HostFormat, host_severity};
pub use init::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, host_layer, host_subscriber, init_logging,
};
