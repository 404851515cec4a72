//! Typed views over the invocation context.
//!
//! # Design
//! - Status tokens are parsed into enums that keep unknown values verbatim, so
//!   a newer host never makes parsing fail; only the failure tokens matter.
//! - The download report is read lazily: absent keys become `Unset` variants
//!   and only the steps that need a value turn its absence into an error.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::keys;
use crate::source::OptionSource;

/// Script options configured on the NZBGet settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOptions {
    /// Category a download must carry to be relocated.
    pub category_filter: String,
    /// Directory that receives relocated downloads, as configured.
    pub destination_root: PathBuf,
}

/// Mode the hook was launched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCommand {
    /// Regular post-processing after a download completes.
    Run,
    /// Connectivity check triggered from the settings page.
    Test,
}

impl HookCommand {
    /// Stable label used in traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Test => "test",
        }
    }
}

/// Options plus mode, produced once the preconditions pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Resolved script options.
    pub options: HookOptions,
    /// Requested mode.
    pub command: HookCommand,
}

/// Overall download status reported in `NZBPP_TOTALSTATUS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TotalStatus {
    /// Everything succeeded.
    Success,
    /// Completed with warnings (e.g. health too low for repair).
    Warning,
    /// Download failed.
    Failure,
    /// Removed from the queue before completion.
    Deleted,
    /// Token not known to this version of the hook.
    Other(String),
    /// Key absent.
    Unset,
}

impl TotalStatus {
    /// Parse the raw token provided by the host.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Unset,
            Some("SUCCESS") => Self::Success,
            Some("WARNING") => Self::Warning,
            Some("FAILURE") => Self::Failure,
            Some("DELETED") => Self::Deleted,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Only `SUCCESS` lets the hook proceed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl Display for TotalStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => formatter.write_str("SUCCESS"),
            Self::Warning => formatter.write_str("WARNING"),
            Self::Failure => formatter.write_str("FAILURE"),
            Self::Deleted => formatter.write_str("DELETED"),
            Self::Other(value) => formatter.write_str(value),
            Self::Unset => formatter.write_str("<unset>"),
        }
    }
}

/// Par-check/repair result reported in `NZBPP_PARSTATUS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParStatus {
    /// `0`: par-check disabled or no par files.
    NotChecked,
    /// `1`: checked and repair failed.
    Failed,
    /// `2`: checked and repaired (or nothing to repair).
    Repaired,
    /// `3`: repair possible but disabled.
    RepairDisabled,
    /// `4`: par-check needed but left for manual processing.
    ManualCheck,
    /// Token not known to this version of the hook.
    Other(String),
    /// Key absent.
    Unset,
}

impl ParStatus {
    /// Parse the raw token provided by the host.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Unset,
            Some("0") => Self::NotChecked,
            Some("1") => Self::Failed,
            Some("2") => Self::Repaired,
            Some("3") => Self::RepairDisabled,
            Some("4") => Self::ManualCheck,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// `1` and `4` both leave the payload unusable.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::ManualCheck)
    }
}

/// Unpack result reported in `NZBPP_UNPACKSTATUS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnpackStatus {
    /// `0`: unpack disabled or skipped.
    NotUnpacked,
    /// `1`: unpack failed.
    Failed,
    /// `2`: unpack succeeded.
    Unpacked,
    /// Token not known to this version of the hook.
    Other(String),
    /// Key absent.
    Unset,
}

impl UnpackStatus {
    /// Parse the raw token provided by the host.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Unset,
            Some("0") => Self::NotUnpacked,
            Some("1") => Self::Failed,
            Some("2") => Self::Unpacked,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Whether the unpack step reported a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

/// Facts NZBGet reports about the completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    /// Final directory of the download.
    pub directory: Option<PathBuf>,
    /// Category assigned to the download.
    pub category: Option<String>,
    /// Overall status.
    pub total_status: TotalStatus,
    /// Par-check/repair status.
    pub par_status: ParStatus,
    /// Unpack status.
    pub unpack_status: UnpackStatus,
}

impl DownloadReport {
    /// Read the report from the host-provided keys.
    #[must_use]
    pub fn from_source<S: OptionSource + ?Sized>(source: &S) -> Self {
        Self {
            directory: source
                .get_os(keys::DOWNLOAD_DIRECTORY)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            category: source.get(keys::CATEGORY),
            total_status: TotalStatus::parse(source.get(keys::TOTAL_STATUS).as_deref()),
            par_status: ParStatus::parse(source.get(keys::PAR_STATUS).as_deref()),
            unpack_status: UnpackStatus::parse(source.get(keys::UNPACK_STATUS).as_deref()),
        }
    }

    /// Exact, case-sensitive category comparison. An absent category never matches.
    #[must_use]
    pub fn matches_category(&self, filter: &str) -> bool {
        self.category.as_deref() == Some(filter)
    }

    /// Download directory, required once the status checks pass.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingHostValue`] when the host omitted the directory.
    pub fn directory(&self) -> ConfigResult<&Path> {
        self.directory
            .as_deref()
            .ok_or(ConfigError::MissingHostValue {
                key: keys::DOWNLOAD_DIRECTORY,
            })
    }
}
