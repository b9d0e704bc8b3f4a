//! Integration tests for the brcmfw CLI surface
//!
//! - Wrong argument count exits with a usage message
//! - Missing INF file is a fatal, user-visible error
//! - A valid run reports packaged firmware counts

mod common;

use common::{TestFolders, SAMPLE_INF};
use std::process::Command;

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_brcmfw"))
        .output()
        .expect("Failed to execute brcmfw");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "no usage message in: {stderr}");
}

#[test]
fn test_single_argument_prints_usage_and_fails() {
    let folders = TestFolders::new();
    let output = Command::new(env!("CARGO_BIN_EXE_brcmfw"))
        .arg(folders.input.path())
        .output()
        .expect("Failed to execute brcmfw");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_extra_arguments_fail() {
    let folders = TestFolders::new();
    let output = Command::new(env!("CARGO_BIN_EXE_brcmfw"))
        .arg(folders.input.path())
        .arg(folders.output.path())
        .arg("unexpected")
        .output()
        .expect("Failed to execute brcmfw");
    assert!(!output.status.success());
}

#[test]
fn test_missing_inf_file_is_fatal() {
    let folders = TestFolders::new();
    let output = folders.run();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not found"),
        "missing not-found message in: {stderr}"
    );
}

#[test]
fn test_successful_run_reports_packaged_count() {
    let folders = TestFolders::new();
    folders.write_inf(SAMPLE_INF);
    folders.write_firmware("BCM20702A1_001.002.014.1443.1572.hex", b"firmware one");

    let output = folders.run();
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Packaged 1 firmware"), "stdout: {stdout}");
}
