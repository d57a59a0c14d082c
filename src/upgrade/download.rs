//! Downloading the release archive.
//!
//! The archive URL and local file name are derived from the version alone, so
//! a re-run for the same release finds the archive from the previous attempt
//! and skips the network entirely.
//!
//! A download that fails half way leaves a truncated file behind. The next
//! run treats it as present, and extraction then fails on the corrupt gzip
//! stream; deleting the file is left to the user.

use crate::constants::PLATFORM_SUFFIX;
use crate::core::UpdateError;
use crate::upgrade::version_check::VersionIdentifier;
use crate::utils::progress::ProgressBar;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Where a release archive comes from and where it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub path: PathBuf,
}

impl DownloadTarget {
    /// Derive the archive URL and local path for `version`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use update_golang::upgrade::download::DownloadTarget;
    /// use update_golang::upgrade::version_check::VersionIdentifier;
    /// use std::path::Path;
    ///
    /// let version = VersionIdentifier::parse_override("go1.23.2").unwrap();
    /// let target = DownloadTarget::new("https://go.dev/dl", Path::new("."), &version);
    /// assert_eq!(target.url, "https://go.dev/dl/go1.23.2.linux-amd64.tar.gz");
    /// ```
    pub fn new(download_base: &str, download_dir: &Path, version: &VersionIdentifier) -> Self {
        let file_name = archive_file_name(version);
        Self {
            url: format!("{}/{}", download_base.trim_end_matches('/'), file_name),
            path: download_dir.join(file_name),
        }
    }
}

/// `<version>.<platform>.tar.gz`
pub fn archive_file_name(version: &VersionIdentifier) -> String {
    format!("{version}.{PLATFORM_SUFFIX}.tar.gz")
}

/// What [`fetch_archive`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The archive was streamed to disk.
    Downloaded {
        bytes: u64,
    },
    /// A file already existed at the target path; no request was made.
    AlreadyPresent,
}

/// Download `target.url` to `target.path` unless the file already exists.
///
/// # Errors
///
/// - [`UpdateError::Network`] if the request fails, the status is not a
///   success, or the body stream breaks
/// - [`UpdateError::FileSystem`] / [`UpdateError::PermissionDenied`] if the
///   local file cannot be created or written
pub async fn fetch_archive(
    client: &reqwest::Client,
    target: &DownloadTarget,
    show_progress: bool,
) -> Result<FetchOutcome, UpdateError> {
    let exists = tokio::fs::try_exists(&target.path)
        .await
        .map_err(|e| UpdateError::from_io("check for archive", &target.path, &e))?;
    if exists {
        warn!(
            "{} already exists, skipping download (delete it if an earlier download was interrupted)",
            target.path.display()
        );
        return Ok(FetchOutcome::AlreadyPresent);
    }

    info!("Downloading {}", target.url);

    let mut response = client.get(&target.url).send().await.map_err(|e| UpdateError::Network {
        url: target.url.clone(),
        reason: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpdateError::Network {
            url: target.url.clone(),
            reason: format!("HTTP {status}"),
        });
    }

    let content_length = response.content_length();
    debug!("Content-Length: {:?}", content_length);

    let mut file = tokio::fs::File::create(&target.path)
        .await
        .map_err(|e| UpdateError::from_io("create file", &target.path, &e))?;

    let bar = ProgressBar::bytes(content_length, show_progress);
    bar.set_prefix("downloading");

    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await.map_err(|e| UpdateError::Network {
        url: target.url.clone(),
        reason: format!("download interrupted after {written} bytes: {e}"),
    })? {
        file.write_all(&chunk)
            .await
            .map_err(|e| UpdateError::from_io("write file", &target.path, &e))?;
        written += chunk.len() as u64;
        bar.inc(chunk.len() as u64);
    }

    file.flush().await.map_err(|e| UpdateError::from_io("flush file", &target.path, &e))?;
    bar.finish_and_clear();

    info!("Saved {} ({} bytes)", target.path.display(), written);
    Ok(FetchOutcome::Downloaded {
        bytes: written,
    })
}
