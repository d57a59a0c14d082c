//! Configuration for a single upgrade run.
//!
//! An [`UpgradeConfig`] is built once (by the CLI, or directly by library
//! callers and tests) and passed by reference into the pipeline. Nothing in
//! the crate reads command-line state from globals.

use crate::constants::{
    DEFAULT_INSTALL_ROOT, GO_DOWNLOAD_BASE_URL, GO_DOWNLOAD_PAGE_URL, TOOLCHAIN_DIR_NAME,
    default_network_timeout,
};
use std::path::PathBuf;
use std::time::Duration;

/// Everything the upgrade pipeline needs to know about one run.
///
/// # Examples
///
/// ```rust,no_run
/// use update_golang::upgrade::config::UpgradeConfig;
///
/// let config = UpgradeConfig::new().with_version("go1.23.2").keep_archive(true);
/// assert_eq!(config.install_dir(), std::path::PathBuf::from("/usr/local/go"));
/// ```
#[derive(Debug, Clone)]
pub struct UpgradeConfig {
    /// Release to install. `None` resolves the latest release from the listing page.
    pub version: Option<String>,

    /// Page scanned for the newest release.
    pub listing_url: String,

    /// Base URL archives are downloaded from (no trailing slash needed).
    pub download_base: String,

    /// Directory the archive is downloaded into.
    pub download_dir: PathBuf,

    /// Directory the archive is unpacked into. The toolchain lives in its `go/` child.
    pub install_root: PathBuf,

    /// Leave the archive on disk after a successful install.
    pub keep_archive: bool,

    /// Deadline covering the version lookup and the download.
    pub network_timeout: Duration,

    /// Verify the install root is writable before touching anything.
    pub check_privileges: bool,

    /// Draw progress bars for download and extraction.
    pub show_progress: bool,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            version: None,
            listing_url: GO_DOWNLOAD_PAGE_URL.to_string(),
            download_base: GO_DOWNLOAD_BASE_URL.to_string(),
            download_dir: PathBuf::from("."),
            install_root: PathBuf::from(DEFAULT_INSTALL_ROOT),
            keep_archive: false,
            network_timeout: default_network_timeout(),
            check_privileges: true,
            show_progress: true,
        }
    }
}

impl UpgradeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the release instead of resolving the latest one.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn keep_archive(mut self, keep: bool) -> Self {
        self.keep_archive = keep;
        self
    }

    /// The toolchain directory removed by the cleaner, `<install_root>/go`.
    pub fn install_dir(&self) -> PathBuf {
        self.install_root.join(TOOLCHAIN_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UpgradeConfig::default();
        assert!(config.version.is_none());
        assert_eq!(config.listing_url, "https://go.dev/dl/");
        assert_eq!(config.download_base, "https://go.dev/dl");
        assert_eq!(config.install_root, PathBuf::from("/usr/local"));
        assert_eq!(config.install_dir(), PathBuf::from("/usr/local/go"));
        assert_eq!(config.network_timeout, Duration::from_secs(300));
        assert!(!config.keep_archive);
        assert!(config.check_privileges);
    }

    #[test]
    fn test_builder_methods() {
        let config = UpgradeConfig::new().with_version("go1.20.0").keep_archive(true);
        assert_eq!(config.version.as_deref(), Some("go1.20.0"));
        assert!(config.keep_archive);
    }
}
