//! Resolving which Go release to install.
//!
//! The newest release is found by scanning the release listing page for the
//! row carrying the [`LATEST_RELEASE_MARKER`] and pulling the first
//! `go<major>.<minor>.<patch>` identifier out of that line. There is no
//! structured page parsing: a layout change on the listing page surfaces as a
//! [`UpdateError::NotFound`] rather than a wrong version.
//!
//! [`LATEST_RELEASE_MARKER`]: crate::constants::LATEST_RELEASE_MARKER

use crate::constants::LATEST_RELEASE_MARKER;
use crate::core::UpdateError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, info};

static RELEASE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"go\d+\.\d+\.\d+").expect("release pattern is valid"));

// First releases of a minor line ("go1.18") and pre-releases ("go1.22rc1")
// are valid downloads too.
static PINNED_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^go\d+\.\d+(\.\d+)?((rc|beta)\d+)?$").expect("pinned pattern is valid")
});

/// A Go release name such as `go1.23.2`, validated before it is used to build
/// a download URL or a local file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionIdentifier(String);

impl VersionIdentifier {
    /// Validate a user-supplied release name and pass it through unchanged.
    ///
    /// Surrounding whitespace is trimmed; nothing else is rewritten.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::Parse`] when the value does not look like a Go
    /// release name (e.g. `1.23.2` without the `go` prefix).
    pub fn parse_override(raw: &str) -> Result<Self, UpdateError> {
        let trimmed = raw.trim();
        if PINNED_VERSION.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(UpdateError::Parse {
                input: raw.to_string(),
                reason: "expected a release name like go1.23.2".to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Return the first line of `body` containing `marker`.
///
/// # Errors
///
/// Returns [`UpdateError::NotFound`] when no line contains the marker. The
/// `url` is only used for the error message.
pub fn find_marker_line<'a>(body: &'a str, marker: &str, url: &str) -> Result<&'a str, UpdateError> {
    body.split('\n')
        .enumerate()
        .find(|(_, line)| line.contains(marker))
        .map(|(index, line)| {
            debug!("Marker found on line {}: {}", index + 1, line.trim());
            line
        })
        .ok_or_else(|| UpdateError::NotFound {
            marker: marker.to_string(),
            url: url.to_string(),
        })
}

/// Extract the first `go<major>.<minor>.<patch>` identifier from a line.
///
/// # Errors
///
/// Returns [`UpdateError::Parse`] when the line holds no such identifier.
///
/// # Examples
///
/// ```rust,no_run
/// use update_golang::upgrade::version_check::extract_version;
///
/// let line = r#"<tr class="toggleVisible"><td>go1.23.2.linux-amd64.tar.gz</td></tr>"#;
/// assert_eq!(extract_version(line).unwrap().as_str(), "go1.23.2");
/// ```
pub fn extract_version(line: &str) -> Result<VersionIdentifier, UpdateError> {
    let found = RELEASE_VERSION.find(line).ok_or_else(|| UpdateError::Parse {
        input: line.trim().to_string(),
        reason: "no go<major>.<minor>.<patch> identifier on the line".to_string(),
    })?;

    debug!("Go version found: {}", found.as_str());
    Ok(VersionIdentifier(found.as_str().to_string()))
}

/// Scan a listing page body for the newest release.
pub fn latest_from_listing(body: &str, url: &str) -> Result<VersionIdentifier, UpdateError> {
    let line = find_marker_line(body, LATEST_RELEASE_MARKER, url)?;
    extract_version(line)
}

/// Fetch the release listing and return the newest release on it.
///
/// # Errors
///
/// - [`UpdateError::Network`] if the request fails or the status is not a success
/// - [`UpdateError::NotFound`] if the marker line is missing
/// - [`UpdateError::Parse`] if the marker line carries no version
pub async fn resolve_latest(
    client: &reqwest::Client,
    listing_url: &str,
) -> Result<VersionIdentifier, UpdateError> {
    debug!("Fetching release listing from {}", listing_url);

    let response = client.get(listing_url).send().await.map_err(|e| UpdateError::Network {
        url: listing_url.to_string(),
        reason: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpdateError::Network {
            url: listing_url.to_string(),
            reason: format!("HTTP {status}"),
        });
    }

    let body = response.text().await.map_err(|e| UpdateError::Network {
        url: listing_url.to_string(),
        reason: format!("failed to read response body: {e}"),
    })?;

    let version = latest_from_listing(&body, listing_url)?;
    info!("Latest Go release: {}", version);
    Ok(version)
}
