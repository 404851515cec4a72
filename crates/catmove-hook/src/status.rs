//! Download status checks run before anything is moved.
//!
//! Each check is named and evaluated on its own; [`check_status`] runs all of
//! them and keeps every failure.

use catmove_config::{DownloadReport, TotalStatus};
use thiserror::Error;

/// One of the status checks applied to a completed download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCheck {
    /// Overall status must be `SUCCESS`.
    Total,
    /// Par-repair must not have failed or been left for manual checking.
    Par,
    /// Unpack must not have failed.
    Unpack,
}

impl StatusCheck {
    /// Every check, in evaluation order.
    pub const ALL: [Self; 3] = [Self::Total, Self::Par, Self::Unpack];

    /// Stable label used in traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Par => "par",
            Self::Unpack => "unpack",
        }
    }

    /// Evaluate this check against `report`.
    #[must_use]
    pub fn evaluate(self, report: &DownloadReport) -> Option<StatusFailure> {
        match self {
            Self::Total => (!report.total_status.is_success()).then(|| StatusFailure::Download {
                status: report.total_status.clone(),
            }),
            Self::Par => report
                .par_status
                .is_failure()
                .then_some(StatusFailure::ParRepair),
            Self::Unpack => report
                .unpack_status
                .is_failure()
                .then_some(StatusFailure::Unpack),
        }
    }
}

/// A failed status check, rendered as the host log message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusFailure {
    /// Overall status was something other than `SUCCESS`.
    #[error("Download failed with status {status}.")]
    Download {
        /// Status reported by the host.
        status: TotalStatus,
    },
    /// Par-check or repair failed.
    #[error("Par-repair failed.")]
    ParRepair,
    /// Unpack failed.
    #[error("Unpack failed.")]
    Unpack,
}

impl StatusFailure {
    /// Check that produced this failure.
    #[must_use]
    pub const fn check(&self) -> StatusCheck {
        match self {
            Self::Download { .. } => StatusCheck::Total,
            Self::ParRepair => StatusCheck::Par,
            Self::Unpack => StatusCheck::Unpack,
        }
    }
}

/// Run every check and collect the failures. An empty result means the download is usable.
#[must_use]
pub fn check_status(report: &DownloadReport) -> Vec<StatusFailure> {
    StatusCheck::ALL
        .into_iter()
        .filter_map(|check| check.evaluate(report))
        .collect()
}
