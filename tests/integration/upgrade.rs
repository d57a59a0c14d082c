use crate::common::{TestEnvironment, mock_archive, mock_listing};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_upgrade_to_latest_replaces_installation() {
    let env = TestEnvironment::new().unwrap();
    env.seed_install("go1.21.0").unwrap();

    let mut server = mockito::Server::new();
    let listing = mock_listing(&mut server, "go1.23.2", 1);
    let archive = mock_archive(&mut server, "go1.23.2", 1);

    env.command(&server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed go1.23.2"))
        .stdout(predicate::str::contains("Removed previous installation"));

    let go = env.install_dir();
    assert!(fs::read_to_string(go.join("VERSION")).unwrap().starts_with("go1.23.2\n"));
    assert!(!go.join("bin/leftover").exists());
    assert!(!env.archive_path("go1.23.2").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(go.join("bin/go")).unwrap().permissions().mode();
        assert_eq!(mode & 0o755, 0o755);
    }

    listing.assert();
    archive.assert();
}

#[test]
fn test_pinned_version_never_reads_listing() {
    let env = TestEnvironment::new().unwrap();

    let mut server = mockito::Server::new();
    let listing = mock_listing(&mut server, "go1.23.2", 0);
    let archive = mock_archive(&mut server, "go1.20.0", 1);

    env.command(&server.url())
        .args(["-v", "go1.20.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed go1.20.0"));

    assert!(env.install_dir().join("bin/gofmt").is_file());
    listing.assert();
    archive.assert();
}

#[test]
fn test_listing_outage_leaves_system_untouched() {
    let env = TestEnvironment::new().unwrap();
    env.seed_install("go1.21.0").unwrap();

    let mut server = mockito::Server::new();
    let _listing = server.mock("GET", "/dl/").with_status(503).create();
    let archive = mock_archive(&mut server, "go1.23.2", 0);

    env.command(&server.url())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("503"))
        .stderr(predicate::str::contains("version lookup failed"));

    assert!(env.install_dir().join("bin/leftover").exists());
    assert_eq!(fs::read_dir(&env.download_dir).unwrap().count(), 0);
    archive.assert();
}

#[test]
fn test_changed_listing_layout_is_reported() {
    let env = TestEnvironment::new().unwrap();

    let mut server = mockito::Server::new();
    let _listing = server
        .mock("GET", "/dl/")
        .with_status(200)
        .with_body("<html><body>Downloads moved</body></html>")
        .create();

    env.command(&server.url())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("toggleVisible"))
        .stderr(predicate::str::contains("--version"));
}

#[test]
fn test_keep_archive_then_offline_rerun() {
    let env = TestEnvironment::new().unwrap();

    let mut server = mockito::Server::new();
    let archive = mock_archive(&mut server, "go1.23.2", 1);

    env.command(&server.url())
        .args(["--version", "go1.23.2", "--keep-archive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive kept at"));
    assert!(env.archive_path("go1.23.2").is_file());

    env.command(&server.url())
        .args(["--version", "go1.23.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reused existing archive"));
    assert!(!env.archive_path("go1.23.2").exists());
    assert!(env.install_dir().join("bin/go").is_file());

    archive.assert();
}

#[test]
fn test_quiet_run_prints_nothing() {
    let env = TestEnvironment::new().unwrap();

    let mut server = mockito::Server::new();
    let _archive = mock_archive(&mut server, "go1.22.8", 1);

    env.command(&server.url())
        .args(["--quiet", "--version", "go1.22.8"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(env.install_dir().join("VERSION").is_file());
}
