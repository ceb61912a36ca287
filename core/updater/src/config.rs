//! Configuration for the update reconciler

use std::path::PathBuf;
use std::time::Duration;

/// Upstream script resource, also the version-check target.
pub const DEFAULT_SCRIPT_URL: &str =
    "https://raw.githubusercontent.com/loxerex/Winter-Normal-Macro/main/Winter_Event.py";

/// Upstream zip archive of auxiliary resource files.
pub const DEFAULT_RESOURCES_URL: &str =
    "https://github.com/loxerex/Winter-Normal-Macro/raw/refs/heads/main/Images.zip";

/// Configuration for the update reconciler.
///
/// Built once at startup and passed in explicitly; nothing in this crate
/// reads process-wide state. Local file names are derived from the URLs,
/// so pointing the config at a fake endpoint also relocates the files it
/// writes.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Directory holding the macro distribution
    pub install_root: PathBuf,

    /// Raw-text script resource scanned for the version marker
    pub script_url: String,

    /// Zip archive extracted over the install root
    pub resources_url: String,

    /// Timeout for the version-check request (default: 20 seconds)
    pub check_timeout: Duration,

    /// Timeout for each download request (default: 60 seconds)
    pub download_timeout: Duration,
}

impl UpdateConfig {
    /// Create a config with the upstream defaults for the given root.
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            script_url: DEFAULT_SCRIPT_URL.to_string(),
            resources_url: DEFAULT_RESOURCES_URL.to_string(),
            check_timeout: Duration::from_secs(20),
            download_timeout: Duration::from_secs(60),
        }
    }

    /// Override the script URL
    pub fn script_url(mut self, url: impl Into<String>) -> Self {
        self.script_url = url.into();
        self
    }

    /// Override the resource bundle URL
    pub fn resources_url(mut self, url: impl Into<String>) -> Self {
        self.resources_url = url.into();
        self
    }

    /// Set the version-check timeout
    pub fn check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout = timeout;
        self
    }

    /// Set the download timeout
    pub fn download_timeout(mut self, timeout: Duration) -> Self {
        self.download_timeout = timeout;
        self
    }

    /// Local file name of the worker script, derived from its URL.
    pub fn script_name(&self) -> String {
        file_name_from_url(&self.script_url)
    }

    /// Local path of the worker script.
    pub fn script_path(&self) -> PathBuf {
        self.install_root.join(self.script_name())
    }

    /// Local path the resource archive is downloaded to before extraction.
    pub fn archive_path(&self) -> PathBuf {
        self.install_root.join(file_name_from_url(&self.resources_url))
    }
}

/// Last path segment of a URL, with spaces normalized to underscores.
fn file_name_from_url(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).replace(' ', "_")
}
