//! Decision-and-move procedure for one NZBGet invocation.
//!
//! # Design
//! - An ordered list of named steps; each returns `Continue` with the state the
//!   next step needs, or `Halt` with a terminal outcome.
//! - A single runner traces every step so a `RUST_LOG=trace` run shows where an
//!   invocation stopped.
//! - At most one filesystem mutation happens, in the final `transfer` step.

use std::path::{Path, PathBuf};

use catmove_config::{DownloadReport, HookCommand, HookOptions, OptionSource, loader};
use catmove_fsops::{Placement, ResolvedPaths, Transfer, resolve_paths};
use tracing::{debug, info, trace};

use crate::error::{HookError, HookResult};
use crate::protocol::ExitStatus;
use crate::status::check_status;

/// Terminal result of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Settings-page test completed.
    Tested,
    /// Category did not match the filter.
    Skipped,
    /// Download already lives directly under the destination root.
    AlreadyInPlace,
    /// Download was moved.
    Moved {
        /// New directory to report back to NZBGet.
        directory: PathBuf,
    },
}

impl Outcome {
    /// Stable label used in traces.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tested => "tested",
            Self::Skipped => "skipped",
            Self::AlreadyInPlace => "already_in_place",
            Self::Moved { .. } => "moved",
        }
    }

    /// Exit status NZBGet expects for this outcome.
    #[must_use]
    pub const fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Tested | Self::Moved { .. } => ExitStatus::Success,
            Self::Skipped | Self::AlreadyInPlace => ExitStatus::NoActionTaken,
        }
    }
}

/// Named steps of the procedure, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Confirm NZBGet launched the process.
    VerifyHost,
    /// Read the two script options.
    LoadOptions,
    /// Determine normal or test mode.
    ParseCommand,
    /// Compare the download category with the filter.
    MatchCategory,
    /// Run the status checks.
    CheckStatus,
    /// Canonicalise both directories.
    ResolvePaths,
    /// Decide whether a move is needed.
    CheckPlacement,
    /// Move the download.
    Transfer,
}

impl StepKind {
    /// Stable label used in traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VerifyHost => "verify_host",
            Self::LoadOptions => "load_options",
            Self::ParseCommand => "parse_command",
            Self::MatchCategory => "match_category",
            Self::CheckStatus => "check_status",
            Self::ResolvePaths => "resolve_paths",
            Self::CheckPlacement => "check_placement",
            Self::Transfer => "transfer",
        }
    }
}

enum StepOutcome<T> {
    Continue(T),
    Halt(Outcome),
}

fn execute_step<T, F>(step: StepKind, op: F) -> HookResult<StepOutcome<T>>
where
    F: FnOnce() -> HookResult<StepOutcome<T>>,
{
    trace!(step = step.as_str(), "step started");
    let result = op();
    match &result {
        Ok(StepOutcome::Continue(_)) => trace!(step = step.as_str(), "step completed"),
        Ok(StepOutcome::Halt(outcome)) => {
            trace!(step = step.as_str(), outcome = outcome.as_str(), "step halted");
        }
        Err(err) => trace!(step = step.as_str(), error = %err, "step failed"),
    }
    result
}

macro_rules! advance {
    ($step:expr, $op:expr) => {
        match execute_step($step, $op)? {
            StepOutcome::Continue(value) => value,
            StepOutcome::Halt(outcome) => return Ok(outcome),
        }
    };
}

/// Run the full procedure against `source`, moving through `transfer`.
///
/// # Errors
///
/// Returns the [`HookError`] that ended the invocation. Nothing is logged for
/// it here; see [`crate::protocol::execute`].
pub fn run(source: &dyn OptionSource, transfer: &dyn Transfer) -> HookResult<Outcome> {
    let pipeline = Pipeline { source, transfer };

    advance!(StepKind::VerifyHost, || pipeline.verify_host());
    let options = advance!(StepKind::LoadOptions, || pipeline.load_options());
    advance!(StepKind::ParseCommand, || pipeline.parse_command(&options));
    let report = advance!(StepKind::MatchCategory, || {
        Ok(pipeline.match_category(&options))
    });
    advance!(StepKind::CheckStatus, || Pipeline::check_status(&report));
    let paths = advance!(StepKind::ResolvePaths, || {
        Pipeline::resolve_paths(&options, &report)
    });
    let target = advance!(StepKind::CheckPlacement, || {
        Pipeline::check_placement(&report, &paths)
    });
    let directory = advance!(StepKind::Transfer, || {
        pipeline.transfer(&options, &paths, &target)
    });

    Ok(Outcome::Moved { directory })
}

struct Pipeline<'a> {
    source: &'a dyn OptionSource,
    transfer: &'a dyn Transfer,
}

impl Pipeline<'_> {
    fn verify_host(&self) -> HookResult<StepOutcome<()>> {
        loader::verify_host(self.source)?;
        debug!("Script successfully started");
        Ok(StepOutcome::Continue(()))
    }

    fn load_options(&self) -> HookResult<StepOutcome<HookOptions>> {
        Ok(StepOutcome::Continue(loader::load_options(self.source)?))
    }

    fn parse_command(&self, options: &HookOptions) -> HookResult<StepOutcome<()>> {
        match loader::parse_command(self.source)? {
            HookCommand::Run => Ok(StepOutcome::Continue(())),
            HookCommand::Test => {
                debug!("Script successfully invoked with params:");
                debug!("NameOfCategory: {}", options.category_filter);
                debug!(
                    "NewLocationOfCategory: {}",
                    options.destination_root.display()
                );
                Ok(StepOutcome::Halt(Outcome::Tested))
            }
        }
    }

    fn match_category(&self, options: &HookOptions) -> StepOutcome<DownloadReport> {
        let report = DownloadReport::from_source(self.source);
        if report.matches_category(&options.category_filter) {
            StepOutcome::Continue(report)
        } else {
            info!(
                "Skipping move, category is not {}.",
                options.category_filter
            );
            StepOutcome::Halt(Outcome::Skipped)
        }
    }

    fn check_status(report: &DownloadReport) -> HookResult<StepOutcome<()>> {
        let failures = check_status(report);
        if failures.is_empty() {
            Ok(StepOutcome::Continue(()))
        } else {
            Err(HookError::StatusCheck { failures })
        }
    }

    fn resolve_paths(
        options: &HookOptions,
        report: &DownloadReport,
    ) -> HookResult<StepOutcome<ResolvedPaths>> {
        let directory = report.directory()?;
        let paths = resolve_paths(directory, &options.destination_root)
            .map_err(HookError::Precondition)?;
        Ok(StepOutcome::Continue(paths))
    }

    fn check_placement(
        report: &DownloadReport,
        paths: &ResolvedPaths,
    ) -> HookResult<StepOutcome<PathBuf>> {
        match paths.placement().map_err(HookError::Move)? {
            Placement::AlreadyInPlace => {
                let configured = report.directory()?;
                info!(
                    "Skipping move, download directory \"{}\" is already in the proper destination.",
                    configured.display()
                );
                Ok(StepOutcome::Halt(Outcome::AlreadyInPlace))
            }
            Placement::Pending { target } => Ok(StepOutcome::Continue(target)),
        }
    }

    fn transfer(
        &self,
        options: &HookOptions,
        paths: &ResolvedPaths,
        target: &Path,
    ) -> HookResult<StepOutcome<PathBuf>> {
        info!("Moving download directory");
        info!("- Source: {}", paths.source.display());
        info!("- Destination: {}", paths.destination_root.display());

        self.transfer
            .relocate(&paths.source, target)
            .map_err(HookError::Move)?;

        Ok(StepOutcome::Continue(reported_directory(
            &options.destination_root,
            target,
        )))
    }
}

/// Path reported to NZBGet: the configured root when absolute, so the host
/// keeps the form the operator entered, otherwise the canonical target.
fn reported_directory(configured_root: &Path, target: &Path) -> PathBuf {
    match target.file_name() {
        Some(name) if configured_root.is_absolute() => configured_root.join(name),
        _ => target.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_map_to_protocol_codes() {
        assert_eq!(Outcome::Tested.exit_status(), ExitStatus::Success);
        assert_eq!(
            Outcome::Moved {
                directory: PathBuf::from("/library/movies/Movie")
            }
            .exit_status(),
            ExitStatus::Success
        );
        assert_eq!(Outcome::Skipped.exit_status(), ExitStatus::NoActionTaken);
        assert_eq!(
            Outcome::AlreadyInPlace.exit_status(),
            ExitStatus::NoActionTaken
        );
    }

    #[test]
    fn step_labels_are_snake_case() {
        let labels = [
            StepKind::VerifyHost,
            StepKind::LoadOptions,
            StepKind::ParseCommand,
            StepKind::MatchCategory,
            StepKind::CheckStatus,
            StepKind::ResolvePaths,
            StepKind::CheckPlacement,
            StepKind::Transfer,
        ]
        .map(StepKind::as_str);
        assert_eq!(
            labels,
            [
                "verify_host",
                "load_options",
                "parse_command",
                "match_category",
                "check_status",
                "resolve_paths",
                "check_placement",
                "transfer",
            ]
        );
    }

    #[test]
    fn reported_directory_prefers_configured_absolute_root() {
        let target = Path::new("/mnt/real/movies/Movie.2024");
        assert_eq!(
            reported_directory(Path::new("/library/movies"), target),
            PathBuf::from("/library/movies/Movie.2024")
        );
        assert_eq!(
            reported_directory(Path::new("library/movies"), target),
            target.to_path_buf()
        );
    }

    #[test]
    fn halted_steps_short_circuit_the_runner() {
        fn drive() -> HookResult<Outcome> {
            advance!(StepKind::MatchCategory, || Ok(StepOutcome::<()>::Halt(
                Outcome::Skipped
            )));
            Ok(Outcome::Tested)
        }
        assert_eq!(drive().ok(), Some(Outcome::Skipped));
    }
}
