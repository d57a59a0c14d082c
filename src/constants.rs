//! Global constants used throughout the update-golang codebase.
//!
//! The release listing, the download location and the install root are fixed
//! values; every one of them can still be overridden through [`UpgradeConfig`]
//! so that tests and mirrors can point the tool elsewhere.
//!
//! [`UpgradeConfig`]: crate::upgrade::config::UpgradeConfig

use std::time::Duration;

/// Page listing every published Go release, newest first.
pub const GO_DOWNLOAD_PAGE_URL: &str = "https://go.dev/dl/";

/// Base URL that release archives are served from.
pub const GO_DOWNLOAD_BASE_URL: &str = "https://go.dev/dl";

/// Directory the toolchain is unpacked into. Archives contain a top-level
/// `go/` directory, so the toolchain itself lands in `/usr/local/go`.
pub const DEFAULT_INSTALL_ROOT: &str = "/usr/local";

/// Name of the toolchain's own directory inside the install root.
pub const TOOLCHAIN_DIR_NAME: &str = "go";

/// Operating system and architecture of the archives this tool installs.
pub const PLATFORM_SUFFIX: &str = "linux-amd64";

/// Substring marking the listing page row of the newest release.
pub const LATEST_RELEASE_MARKER: &str = r#"class="toggleVisible""#;

/// Deadline covering all network steps of one run (5 minutes).
pub fn default_network_timeout() -> Duration {
    Duration::from_secs(300)
}

/// Timeout for establishing a TCP connection (30 seconds).
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Permission bits applied to extension-less files after extraction.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Permission bits for parent directories created while writing files.
pub const PARENT_DIR_MODE: u32 = 0o755;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("update-golang/", env!("CARGO_PKG_VERSION"));
