use crate::common::TestEnvironment;
use predicates::prelude::*;

#[test]
fn test_help_lists_public_flags_only() {
    let env = TestEnvironment::new().unwrap();
    env.command("http://127.0.0.1:9")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--version"))
        .stdout(predicate::str::contains("--keep-archive"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--skip-privilege-check"))
        .stdout(predicate::str::contains("--listing-url").not())
        .stdout(predicate::str::contains("--install-root").not());
}

#[test]
fn test_invalid_version_exits_with_error() {
    let env = TestEnvironment::new().unwrap();
    env.seed_install("go1.21.0").unwrap();

    // Nothing listens on the discard port; the run must fail before any request
    env.command("http://127.0.0.1:9")
        .args(["--version", "1.23.2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("version lookup failed"))
        .stderr(predicate::str::contains("1.23.2"));

    assert!(env.install_dir().join("bin/leftover").exists());
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    let env = TestEnvironment::new().unwrap();
    env.command("http://127.0.0.1:9")
        .args(["--verbose", "--quiet"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_unreachable_server_reports_network_error() {
    let env = TestEnvironment::new().unwrap();
    env.command("http://127.0.0.1:9")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Network error"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_huge_timeout_exits_with_error() {
    let env = TestEnvironment::new().unwrap();
    env.command("http://127.0.0.1:9")
        .args(["--version", "go1.23.2", "--timeout", "18446744073709551615"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("too large"));
}
