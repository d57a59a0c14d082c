//! Archive and listing-page fixtures for tests.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io;
use std::path::{Path, PathBuf};
use tar::{Builder, EntryType, Header};

enum FixtureEntry {
    Dir {
        path: String,
        mode: u32,
    },
    File {
        path: String,
        contents: Vec<u8>,
        mode: u32,
    },
    Symlink {
        path: String,
        target: String,
    },
}

/// Builds small `.tar.gz` archives shaped like Go release archives.
///
/// # Example
///
/// ```rust,no_run
/// use update_golang::test_utils::ArchiveFixture;
///
/// let dir = tempfile::tempdir().unwrap();
/// let archive = ArchiveFixture::go_toolchain("go1.23.2").write_to(dir.path()).unwrap();
/// assert!(archive.ends_with("go1.23.2.linux-amd64.tar.gz"));
/// ```
#[derive(Default)]
pub struct ArchiveFixture {
    entries: Vec<FixtureEntry>,
    file_name: Option<String>,
}

impl ArchiveFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A miniature toolchain: `go/` with `bin/go`, `bin/gofmt`, `VERSION`,
    /// `README.md` and `src/runtime/proc.go`, named like a real release archive.
    pub fn go_toolchain(version: &str) -> Self {
        let mut fixture = Self::new()
            .dir("go", 0o755)
            .dir("go/bin", 0o755)
            .dir("go/src", 0o755)
            .dir("go/src/runtime", 0o755)
            .dir("go/pkg", 0o755)
            .dir("go/pkg/tool", 0o755)
            .file("go/VERSION", format!("{version}\ntime 2024-10-01T16:07:39Z\n").as_bytes())
            .file("go/README.md", b"# The Go Programming Language\n")
            .file("go/bin/go", b"\x7fELF go binary")
            .file("go/bin/gofmt", b"\x7fELF gofmt binary")
            .file("go/src/runtime/proc.go", b"package runtime\n");
        fixture.file_name = Some(format!("{version}.linux-amd64.tar.gz"));
        fixture
    }

    pub fn dir(mut self, path: &str, mode: u32) -> Self {
        self.entries.push(FixtureEntry::Dir {
            path: format!("{}/", path.trim_end_matches('/')),
            mode,
        });
        self
    }

    /// Add a regular file stored with mode 0644.
    pub fn file(mut self, path: &str, contents: &[u8]) -> Self {
        self.entries.push(FixtureEntry::File {
            path: path.to_string(),
            contents: contents.to_vec(),
            mode: 0o644,
        });
        self
    }

    pub fn symlink(mut self, path: &str, target: &str) -> Self {
        self.entries.push(FixtureEntry::Symlink {
            path: path.to_string(),
            target: target.to_string(),
        });
        self
    }

    /// Encode the archive as gzip-compressed tar bytes.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = Builder::new(encoder);

        for entry in &self.entries {
            let mut header = Header::new_gnu();
            match entry {
                FixtureEntry::Dir {
                    path,
                    mode,
                } => {
                    header.set_entry_type(EntryType::Directory);
                    header.set_mode(*mode);
                    header.set_size(0);
                    builder.append_data(&mut header, path, io::empty())?;
                }
                FixtureEntry::File {
                    path,
                    contents,
                    mode,
                } => {
                    header.set_entry_type(EntryType::Regular);
                    header.set_mode(*mode);
                    header.set_size(contents.len() as u64);
                    builder.append_data(&mut header, path, contents.as_slice())?;
                }
                FixtureEntry::Symlink {
                    path,
                    target,
                } => {
                    header.set_entry_type(EntryType::Symlink);
                    header.set_mode(0o777);
                    header.set_size(0);
                    header.set_link_name(target)?;
                    builder.append_data(&mut header, path, io::empty())?;
                }
            }
        }

        builder.into_inner()?.finish()
    }

    /// Write the archive into `dir` under its release name (or `archive.tar.gz`).
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let name = self.file_name.clone().unwrap_or_else(|| "archive.tar.gz".to_string());
        self.write_named(dir, &name)
    }

    pub fn write_named(&self, dir: &Path, name: &str) -> io::Result<PathBuf> {
        let path = dir.join(name);
        std::fs::write(&path, self.to_bytes()?)?;
        Ok(path)
    }
}

/// A release listing page whose newest release is `version`.
pub fn listing_page(version: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<body>
<h2 id="stable">Stable versions</h2>
<div class="toggle" id="{version}">
<table class="downloadtable">
<tr class="toggleVisible"><td class="filename"><a class="download" href="/dl/{version}.linux-amd64.tar.gz">{version}.linux-amd64.tar.gz</a></td><td>Archive</td><td>Linux</td><td>x86-64</td></tr>
<tr><td class="filename"><a class="download" href="/dl/go1.0.1.src.tar.gz">go1.0.1.src.tar.gz</a></td></tr>
</table>
</div>
</body>
</html>
"#
    )
}
