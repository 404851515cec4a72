//! # Design
//!
//! - Configuration failures are always fatal and happen before any filesystem work.
//! - Messages are written for the NZBGet log, so they name the option the operator must fix.

use thiserror::Error;

use crate::keys;

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading the invocation context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The host marker was absent, so the process was not launched by NZBGet.
    #[error("This script can only be called from NZBGet.")]
    NotInvokedByHost {
        /// Marker key that was expected.
        key: &'static str,
    },
    /// A required script option was not configured.
    #[error(
        "Option {} is missing in configuration file. Please check script settings",
        keys::option_name(.key)
    )]
    MissingOption {
        /// Full environment key of the option.
        key: &'static str,
    },
    /// The settings page sent a command the hook does not implement.
    #[error("Invalid command {value}")]
    InvalidCommand {
        /// Command value provided by the host.
        value: String,
    },
    /// A value NZBGet always supplies for post-processing was absent.
    #[error("Host did not provide {key}")]
    MissingHostValue {
        /// Environment key that was expected.
        key: &'static str,
    },
}
