//! Removing the previous toolchain before the new one is unpacked.
//!
//! The extractor does not merge into an existing tree, so this must finish
//! before extraction starts. Only the toolchain directory itself is removed;
//! siblings in the install root are never touched.

use crate::core::UpdateError;
use std::path::Path;
use tracing::{debug, info};

/// What [`remove_install_dir`] found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    Removed,
    NotPresent,
}

/// Recursively delete `path`. A missing path is a successful no-op.
///
/// # Errors
///
/// - [`UpdateError::FileSystem`] if `path` is relative or removal fails
/// - [`UpdateError::PermissionDenied`] if the current user may not remove it
pub async fn remove_install_dir(path: &Path) -> Result<CleanOutcome, UpdateError> {
    if !path.is_absolute() {
        return Err(UpdateError::FileSystem {
            operation: "remove directory".to_string(),
            path: path.display().to_string(),
            reason: "refusing to remove a relative path".to_string(),
        });
    }

    info!("Removing old Go installation: {}", path.display());
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(CleanOutcome::Removed),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("{} does not exist, nothing to remove", path.display());
            Ok(CleanOutcome::NotPresent)
        }
        Err(e) => Err(UpdateError::from_io("remove directory", path, &e)),
    }
}
