//! Unpacking a `.tar.gz` release archive into the install root.
//!
//! Entries are processed in archive order in a single pass. Directories are
//! created with the mode recorded in the archive; regular files are written
//! byte for byte and, when their name has no extension, made executable.
//! Go ships its binaries (`go`, `gofmt`, the tools under `pkg/tool`) without
//! extensions, which is what that rule relies on. Other entry types such as
//! symlinks are skipped with a warning.
//!
//! Nothing is rolled back when an entry fails: the error is returned and the
//! partially unpacked tree stays on disk until the next run cleans it.

use crate::constants::{EXECUTABLE_MODE, PARENT_DIR_MODE};
use crate::core::UpdateError;
use crate::utils::progress::ProgressBar;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use tar::{Archive, EntryType};
use tracing::{debug, info, warn};

/// Counts of what an extraction wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub directories: usize,
    pub files: usize,
    /// Files that received the executable mode.
    pub executables: usize,
    /// Entries of unsupported types that were ignored.
    pub skipped: usize,
}

/// Unpack `archive` into `dest_root`, preserving relative paths.
///
/// Runs synchronously; async callers should use [`extract_in_background`].
///
/// # Errors
///
/// - [`UpdateError::FileSystem`] if the archive cannot be read or decompressed,
///   an entry path escapes `dest_root`, or a file or directory cannot be written
/// - [`UpdateError::PermissionDenied`] if `dest_root` is not writable
pub fn extract_archive(
    archive: &Path,
    dest_root: &Path,
    show_progress: bool,
) -> Result<ExtractSummary, UpdateError> {
    info!("Extracting {} to {}", archive.display(), dest_root.display());

    let file = File::open(archive).map_err(|e| UpdateError::from_io("open archive", archive, &e))?;
    let compressed_len = file.metadata().ok().map(|m| m.len());

    let bar = ProgressBar::bytes(compressed_len, show_progress);
    bar.set_prefix("extracting");

    let mut tar = Archive::new(GzDecoder::new(bar.wrap_read(file)));
    let entries = tar.entries().map_err(|e| read_error(archive, &e))?;

    let mut summary = ExtractSummary::default();
    for entry in entries {
        let mut entry = entry.map_err(|e| read_error(archive, &e))?;
        let relative = entry.path().map_err(|e| read_error(archive, &e))?.into_owned();
        let target = destination_for(dest_root, &relative)?;

        match entry.header().entry_type() {
            EntryType::Directory => {
                let mode = entry.header().mode().unwrap_or(PARENT_DIR_MODE);
                create_dir_with_mode(&target, mode)?;
                summary.directories += 1;
            }
            EntryType::Regular => {
                if let Some(parent) = target.parent() {
                    create_dir_with_mode(parent, PARENT_DIR_MODE)?;
                }

                let mut out = File::create(&target)
                    .map_err(|e| UpdateError::from_io("create file", &target, &e))?;
                io::copy(&mut entry, &mut out)
                    .map_err(|e| UpdateError::from_io("write file", &target, &e))?;
                drop(out);
                summary.files += 1;

                if !has_extension(&target) {
                    mark_executable(&target)?;
                    summary.executables += 1;
                }
            }
            other => {
                warn!("Skipping unsupported entry type {:?}: {}", other, relative.display());
                summary.skipped += 1;
            }
        }
    }

    bar.finish_and_clear();
    debug!("Extraction summary: {:?}", summary);
    Ok(summary)
}

/// Run [`extract_archive`] on the blocking thread pool.
pub async fn extract_in_background(
    archive: PathBuf,
    dest_root: PathBuf,
    show_progress: bool,
) -> Result<ExtractSummary, UpdateError> {
    tokio::task::spawn_blocking(move || extract_archive(&archive, &dest_root, show_progress))
        .await
        .map_err(|e| UpdateError::Other {
            message: format!("Task join error during extraction: {e}"),
        })?
}

/// A name "has an extension" when its final component contains a dot, so
/// dotfiles such as `.gitignore` keep their permissions too.
fn has_extension(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name.to_string_lossy().contains('.'))
}

fn destination_for(dest_root: &Path, relative: &Path) -> Result<PathBuf, UpdateError> {
    let escapes = relative.components().any(|c| {
        matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
    });
    if escapes {
        return Err(UpdateError::FileSystem {
            operation: "extract entry".to_string(),
            path: relative.display().to_string(),
            reason: "entry path escapes the destination directory".to_string(),
        });
    }
    Ok(dest_root.join(relative))
}

fn read_error(archive: &Path, e: &io::Error) -> UpdateError {
    UpdateError::FileSystem {
        operation: "read archive".to_string(),
        path: archive.display().to_string(),
        reason: e.to_string(),
    }
}

#[cfg(unix)]
fn create_dir_with_mode(path: &Path, mode: u32) -> Result<(), UpdateError> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(mode)
        .create(path)
        .map_err(|e| UpdateError::from_io("create directory", path, &e))
}

#[cfg(not(unix))]
fn create_dir_with_mode(path: &Path, _mode: u32) -> Result<(), UpdateError> {
    fs::create_dir_all(path).map_err(|e| UpdateError::from_io("create directory", path, &e))
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<(), UpdateError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
        .map_err(|e| UpdateError::from_io("set permissions on", path, &e))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<(), UpdateError> {
    Ok(())
}
