//! Ordered precondition checks run before any decision is made.
//!
//! Each check is exposed on its own so the hook pipeline can run them as
//! separate named steps; `load_invocation` chains them for callers that only
//! need the result.

use std::path::PathBuf;

use crate::error::{ConfigError, ConfigResult};
use crate::keys;
use crate::model::{HookCommand, HookOptions, Invocation};
use crate::source::OptionSource;

/// Confirm the process was launched by NZBGet.
///
/// # Errors
///
/// Returns [`ConfigError::NotInvokedByHost`] when the host marker is absent.
pub fn verify_host<S: OptionSource + ?Sized>(source: &S) -> ConfigResult<()> {
    if source.contains(keys::HOST_MARKER) {
        Ok(())
    } else {
        Err(ConfigError::NotInvokedByHost {
            key: keys::HOST_MARKER,
        })
    }
}

/// Read the required script options.
///
/// Presence is all that is checked here; the destination is validated against
/// the filesystem later.
///
/// # Errors
///
/// Returns [`ConfigError::MissingOption`] for the first absent option.
pub fn load_options<S: OptionSource + ?Sized>(source: &S) -> ConfigResult<HookOptions> {
    let category_filter = source
        .get(keys::CATEGORY_FILTER)
        .ok_or(ConfigError::MissingOption {
            key: keys::CATEGORY_FILTER,
        })?;
    let destination_root = source
        .get_os(keys::DESTINATION_ROOT)
        .ok_or(ConfigError::MissingOption {
            key: keys::DESTINATION_ROOT,
        })?;

    Ok(HookOptions {
        category_filter,
        destination_root: PathBuf::from(destination_root),
    })
}

/// Determine the requested mode from the command key.
///
/// An empty command is treated like an absent one.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidCommand`] for any value other than `Test`.
pub fn parse_command<S: OptionSource + ?Sized>(source: &S) -> ConfigResult<HookCommand> {
    match source.get(keys::COMMAND).as_deref() {
        None | Some("") => Ok(HookCommand::Run),
        Some(keys::TEST_COMMAND) => Ok(HookCommand::Test),
        Some(other) => Err(ConfigError::InvalidCommand {
            value: other.to_string(),
        }),
    }
}

/// Run every precondition in order and assemble the invocation.
///
/// # Errors
///
/// Returns the first configuration error encountered.
pub fn load_invocation<S: OptionSource + ?Sized>(source: &S) -> ConfigResult<Invocation> {
    verify_host(source)?;
    let options = load_options(source)?;
    let command = parse_command(source)?;
    Ok(Invocation { options, command })
}
