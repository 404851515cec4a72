//! Scratch directories and host contexts mirroring real NZBGet invocations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use catmove_config::{MapSource, keys};
use tempfile::TempDir;

/// Marker value NZBGet passes; only its presence matters.
pub const SCRIPT_DIR: &str = "/usr/share/nzbget/scripts";

/// A temporary `downloads/` + `library/movies/` layout.
pub struct Library {
    temp: TempDir,
    downloads: PathBuf,
    destination: PathBuf,
}

impl Library {
    /// Create the layout inside a fresh temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn new() -> Result<Self> {
        let temp = tempfile::Builder::new().prefix("catmove-").tempdir()?;
        let downloads = temp.path().join("downloads");
        let destination = temp.path().join("library").join("movies");
        fs::create_dir_all(&downloads)?;
        fs::create_dir_all(&destination)?;
        Ok(Self {
            temp,
            downloads,
            destination,
        })
    }

    /// Root of the scratch area.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Directory completed downloads land in.
    #[must_use]
    pub fn downloads(&self) -> &Path {
        &self.downloads
    }

    /// Category destination root.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Create a completed download named `name` holding a single payload file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or payload cannot be written.
    pub fn add_download(&self, name: &str) -> Result<PathBuf> {
        let directory = self.downloads.join(name);
        fs::create_dir_all(&directory)?;
        fs::write(directory.join(format!("{name}.mkv")), name.as_bytes())?;
        Ok(directory)
    }
}

/// Host marker plus the two script options.
#[must_use]
pub fn host_options(filter: &str, destination: &Path) -> MapSource {
    MapSource::new()
        .with(keys::HOST_MARKER, SCRIPT_DIR)
        .with(keys::CATEGORY_FILTER, filter)
        .with(keys::DESTINATION_ROOT, destination)
}

/// A successful `movies` download at `directory`, routed to `destination`.
#[must_use]
pub fn completed_download(directory: &Path, destination: &Path) -> MapSource {
    host_options("movies", destination)
        .with(keys::CATEGORY, "movies")
        .with(keys::TOTAL_STATUS, "SUCCESS")
        .with(keys::PAR_STATUS, "2")
        .with(keys::UNPACK_STATUS, "0")
        .with(keys::DOWNLOAD_DIRECTORY, directory)
}

/// Settings-page `Test` command for the given options.
#[must_use]
pub fn test_command(filter: &str, destination: &Path) -> MapSource {
    host_options(filter, destination).with(keys::COMMAND, keys::TEST_COMMAND)
}
