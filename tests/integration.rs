use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_flag() {
    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deskwatch"))
        .stdout(predicate::str::contains("help-desk console"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deskwatch"));
}

#[test]
fn test_list_sections() {
    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.arg("--list-sections")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("tickets"))
        .stdout(predicate::str::contains("AD User Lookup"));
}

#[test]
fn test_invalid_argument() {
    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_refresh_interval_validation() {
    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.args(["-t", "30"])
        .arg("--list-sections")
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.args(["-t", "1"])
        .arg("--list-sections")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refresh interval too small"));
}

#[test]
fn test_server_url_validation() {
    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.args(["-s", "ftp://example.com"])
        .arg("--list-sections")
        .assert()
        .failure()
        .stderr(predicate::str::contains("http"));
}

#[test]
fn test_invalid_section_id() {
    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.args(["--section", "Not-A-Section!"])
        .arg("--list-sections")
        .assert()
        .failure();
}

#[test]
fn test_check_unreachable_backend_fails() {
    // Port 1 is never listening
    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.args(["-s", "http://127.0.0.1:1"])
        .arg("--check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreachable"));
}

#[test]
fn test_snapshot_degrades_per_resource() {
    // A snapshot against a dead backend still succeeds; every resource
    // prints its own unavailable line instead of aborting the run
    let mut cmd = Command::cargo_bin("deskwatch").unwrap();
    cmd.args(["-s", "http://127.0.0.1:1"])
        .arg("--snapshot")
        .assert()
        .success()
        .stdout(predicate::str::contains("DESKWATCH SNAPSHOT"))
        .stdout(predicate::str::contains("SYSTEM: unavailable"))
        .stdout(predicate::str::contains("TICKETS: unavailable"));
}
