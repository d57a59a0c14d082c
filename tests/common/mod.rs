//! Shared helpers for the integration tests.

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use update_golang::test_utils::{ArchiveFixture, listing_page};

/// An isolated install root and download directory, plus a command builder
/// that points the binary at them and at a mock release server.
pub struct TestEnvironment {
    _temp: TempDir,
    pub install_root: PathBuf,
    pub download_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        let install_root = temp.path().join("usr/local");
        let download_dir = temp.path().join("downloads");
        fs::create_dir_all(&install_root)?;
        fs::create_dir_all(&download_dir)?;

        Ok(Self {
            _temp: temp,
            install_root,
            download_dir,
        })
    }

    pub fn install_dir(&self) -> PathBuf {
        self.install_root.join("go")
    }

    pub fn archive_path(&self, version: &str) -> PathBuf {
        self.download_dir.join(format!("{version}.linux-amd64.tar.gz"))
    }

    /// Put a fake older toolchain in place, with a file no release contains.
    pub fn seed_install(&self, version: &str) -> Result<()> {
        let bin = self.install_dir().join("bin");
        fs::create_dir_all(&bin)?;
        fs::write(self.install_dir().join("VERSION"), format!("{version}\n"))?;
        fs::write(bin.join("go"), b"old binary")?;
        fs::write(bin.join("leftover"), b"from an older release")?;
        Ok(())
    }

    /// `update-golang` wired to `server_url` and this environment's directories.
    pub fn command(&self, server_url: &str) -> Command {
        let mut cmd = Command::cargo_bin("update-golang").unwrap();
        cmd.env("UPDATE_GOLANG_LISTING_URL", format!("{server_url}/dl/"))
            .env("UPDATE_GOLANG_DOWNLOAD_BASE", format!("{server_url}/dl"))
            .env("UPDATE_GOLANG_INSTALL_ROOT", &self.install_root)
            .env("UPDATE_GOLANG_DOWNLOAD_DIR", &self.download_dir)
            .env("UPDATE_GOLANG_NO_PROGRESS", "1")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Serve a listing page that advertises `version`.
pub fn mock_listing(server: &mut mockito::Server, version: &str, hits: usize) -> mockito::Mock {
    server
        .mock("GET", "/dl/")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(listing_page(version))
        .expect(hits)
        .create()
}

/// Serve the release archive for `version`.
pub fn mock_archive(server: &mut mockito::Server, version: &str, hits: usize) -> mockito::Mock {
    let body = ArchiveFixture::go_toolchain(version).to_bytes().unwrap();
    server
        .mock("GET", format!("/dl/{version}.linux-amd64.tar.gz").as_str())
        .with_status(200)
        .with_body(body)
        .expect(hits)
        .create()
}
