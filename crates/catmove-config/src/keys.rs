//! Environment keys exchanged with the NZBGet host.
//!
//! NZBGet groups its variables by prefix: `NZBOP_` for global options,
//! `NZBPO_` for this script's own options, `NZBCP_` for commands sent from the
//! settings page, and `NZBPP_` for the post-processed item.

/// Present whenever NZBGet launches a script; used to detect host invocation.
pub const HOST_MARKER: &str = "NZBOP_SCRIPTDIR";
/// Prefix shared by all script-owned options.
pub const OPTION_PREFIX: &str = "NZBPO_";
/// Category whose downloads should be relocated.
pub const CATEGORY_FILTER: &str = "NZBPO_NAMEOFCATEGORY";
/// Directory that receives relocated downloads.
pub const DESTINATION_ROOT: &str = "NZBPO_NEWLOCATIONOFCATEGORY";
/// Command requested from the NZBGet settings page.
pub const COMMAND: &str = "NZBCP_COMMAND";
/// Only command the hook understands.
pub const TEST_COMMAND: &str = "Test";
/// Final directory of the completed download.
pub const DOWNLOAD_DIRECTORY: &str = "NZBPP_DIRECTORY";
/// Overall status of the download (`SUCCESS`, `WARNING`, ...).
pub const TOTAL_STATUS: &str = "NZBPP_TOTALSTATUS";
/// Numeric par-check/repair result.
pub const PAR_STATUS: &str = "NZBPP_PARSTATUS";
/// Numeric unpack result.
pub const UNPACK_STATUS: &str = "NZBPP_UNPACKSTATUS";
/// Category assigned to the download.
pub const CATEGORY: &str = "NZBPP_CATEGORY";

/// Name of a script option as shown on the NZBGet settings page.
#[must_use]
pub fn option_name(key: &str) -> &str {
    key.strip_prefix(OPTION_PREFIX).unwrap_or(key)
}
