//! NZBGet post-processing protocol: exit codes and script commands.
//!
//! # Design
//! - `execute` is the only place that turns pipeline results into host output.
//! - Errors are logged here once, one `[ERROR]` line per reason.

use std::io::{self, Write};
use std::path::Path;

use catmove_config::OptionSource;
use catmove_fsops::Transfer;
use tracing::error;

use crate::pipeline::{self, Outcome};

/// Exit code for a completed post-processing run.
pub const POSTPROCESS_SUCCESS: i32 = 93;
/// Exit code for a failed post-processing run.
pub const POSTPROCESS_ERROR: i32 = 94;
/// Exit code when the script had nothing to do.
pub const POSTPROCESS_NONE: i32 = 95;

/// Prefix NZBGet recognises as a request to change the download directory.
pub const DIRECTORY_COMMAND: &str = "[NZB] DIRECTORY=";

/// Exit statuses understood by NZBGet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The script did its work.
    Success,
    /// The script failed; NZBGet marks the post-processing as failed.
    Error,
    /// The script had nothing to do.
    NoActionTaken,
}

impl ExitStatus {
    /// Process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => POSTPROCESS_SUCCESS,
            Self::Error => POSTPROCESS_ERROR,
            Self::NoActionTaken => POSTPROCESS_NONE,
        }
    }
}

/// Write the directory-update command for `directory`.
///
/// The path is written as its raw bytes; NZBGet reads it back from the line
/// verbatim, so a lossy rendering would point it at a directory that does not
/// exist.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_directory<W: Write + ?Sized>(out: &mut W, directory: &Path) -> io::Result<()> {
    out.write_all(DIRECTORY_COMMAND.as_bytes())?;
    out.write_all(directory.as_os_str().as_encoded_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Run the hook and translate the result into host output.
///
/// Log lines go through `tracing`; the directory command, which NZBGet parses
/// rather than logs, is written to `out`.
pub fn execute<W: Write + ?Sized>(
    source: &dyn OptionSource,
    transfer: &dyn Transfer,
    out: &mut W,
) -> ExitStatus {
    match pipeline::run(source, transfer) {
        Ok(outcome) => {
            if let Outcome::Moved { directory } = &outcome
                && let Err(err) = write_directory(out, directory)
            {
                error!("Failed to report new directory to NZBGet: {err}");
                return ExitStatus::Error;
            }
            outcome.exit_status()
        }
        Err(err) => {
            for line in err.log_lines() {
                error!("{line}");
            }
            err.exit_status()
        }
    }
}
