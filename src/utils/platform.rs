//! Platform checks run before the pipeline modifies the install root.

use crate::core::UpdateError;
use std::io;
use std::path::Path;
use tracing::debug;

/// Whether the process runs with an effective user id of 0.
#[cfg(unix)]
pub fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    false
}

/// Fail fast when the current user cannot modify `install_root`.
///
/// Root always passes. Anyone else passes if a scratch file can be created in
/// `install_root`, or in its nearest existing ancestor when the root itself
/// does not exist yet (extraction would create it).
///
/// # Errors
///
/// - [`UpdateError::PermissionDenied`] when the location is not writable
/// - [`UpdateError::FileSystem`] for any other probe failure
pub fn ensure_privileged(install_root: &Path) -> Result<(), UpdateError> {
    if is_root() {
        debug!("Running as root, skipping write probe");
        return Ok(());
    }

    let mut probe_dir = install_root;
    loop {
        match tempfile::tempfile_in(probe_dir) {
            Ok(_) => {
                debug!("{} is writable", probe_dir.display());
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => match probe_dir.parent() {
                Some(parent) => probe_dir = parent,
                None => return Err(UpdateError::from_io("probe", install_root, &e)),
            },
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Err(UpdateError::PermissionDenied {
                    operation: "must be root to modify".to_string(),
                    path: install_root.display().to_string(),
                });
            }
            Err(e) => return Err(UpdateError::from_io("probe", probe_dir, &e)),
        }
    }
}
