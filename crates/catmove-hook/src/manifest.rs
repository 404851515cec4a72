//! NZBGet extension manifest describing the hook.
//!
//! NZBGet 23 and later discover extensions through a `manifest.json` placed
//! next to the executable. Option names are written in the settings-page
//! spelling; NZBGet upper-cases them into the `NZBPO_` keys the hook reads, and
//! the tests pin each name to its key in `catmove_config::keys`.

use serde::Serialize;

/// Extension kind for post-processing scripts.
pub const POST_PROCESSING_KIND: &str = "POST-PROCESSING";
/// Option holding the category filter.
pub const CATEGORY_OPTION: &str = "NameOfCategory";
/// Option holding the destination root.
pub const DESTINATION_OPTION: &str = "NewLocationOfCategory";
/// Settings-page command exercising the configuration.
pub const TEST_COMMAND: &str = "Test";

/// Top-level manifest document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Executable NZBGet launches.
    pub main: &'static str,
    /// Internal extension name.
    pub name: &'static str,
    /// Name shown in the NZBGet UI.
    pub display_name: &'static str,
    /// Extension kind.
    pub kind: &'static str,
    /// Extension version.
    pub version: &'static str,
    /// Authors.
    pub author: &'static str,
    /// License identifier.
    pub license: &'static str,
    /// One-line summary.
    pub about: &'static str,
    /// Project homepage.
    pub homepage: &'static str,
    /// Queue events the extension subscribes to; none for post-processing.
    pub queue_events: &'static str,
    /// Scheduler time; unused for post-processing.
    pub task_time: &'static str,
    /// Longer description, one paragraph per entry.
    pub description: Vec<&'static str>,
    /// Runtime requirements shown to the user.
    pub requirements: Vec<&'static str>,
    /// Configurable options.
    pub options: Vec<ManifestOption>,
    /// Settings-page commands.
    pub commands: Vec<ManifestCommand>,
    /// Option sections; the hook uses none.
    pub sections: Vec<serde_json::Value>,
}

/// A configurable option.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestOption {
    /// Option name; NZBGet exports it as `NZBPO_<NAME>`.
    pub name: &'static str,
    /// Name shown in the UI.
    pub display_name: &'static str,
    /// Default value.
    pub value: &'static str,
    /// Help text.
    pub description: Vec<&'static str>,
    /// Allowed values; empty for free text.
    pub select: Vec<&'static str>,
}

/// A button on the settings page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestCommand {
    /// Command name; NZBGet exports it as `NZBCP_COMMAND`.
    pub name: &'static str,
    /// Button label.
    pub action: &'static str,
    /// Name shown in the UI.
    pub display_name: &'static str,
    /// Help text.
    pub description: Vec<&'static str>,
}

/// Manifest for this build of the hook.
#[must_use]
pub fn manifest() -> Manifest {
    Manifest {
        main: "catmove",
        name: "MoveByCategory",
        display_name: "Move By Category",
        kind: POST_PROCESSING_KIND,
        version: env!("CARGO_PKG_VERSION"),
        author: env!("CARGO_PKG_AUTHORS"),
        license: env!("CARGO_PKG_LICENSE"),
        about: "Moves a completed download based on its category.",
        homepage: env!("CARGO_PKG_REPOSITORY"),
        queue_events: "",
        task_time: "",
        description: vec![
            "Moves a successfully downloaded and unpacked item into the configured \
             directory when its category matches, then tells NZBGet the new location.",
        ],
        requirements: Vec::new(),
        options: vec![
            ManifestOption {
                name: CATEGORY_OPTION,
                display_name: CATEGORY_OPTION,
                value: "",
                description: vec!["Category a download must have to be moved."],
                select: Vec::new(),
            },
            ManifestOption {
                name: DESTINATION_OPTION,
                display_name: DESTINATION_OPTION,
                value: "",
                description: vec![
                    "Existing directory that receives matching downloads.",
                ],
                select: Vec::new(),
            },
        ],
        commands: vec![ManifestCommand {
            name: TEST_COMMAND,
            action: TEST_COMMAND,
            display_name: TEST_COMMAND,
            description: vec!["Checks that the script can read its options."],
        }],
        sections: Vec::new(),
    }
}

/// Serialize the manifest, optionally pretty-printed.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(pretty: bool) -> serde_json::Result<String> {
    let document = manifest();
    if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
}
