//! End-to-end packaging tests
//!
//! Runs the full pipeline over a sample INF and firmware folder and checks
//! every emitted artifact: compressed firmware files, latest-version links,
//! injector kexts, the plist manifest, and the markdown index.

mod common;

use common::{TestFolders, SAMPLE_INF};
use plist::Value;

const FIRMWARE_21E8: &str = "BCM20702A1_001.002.014.1443.1572.hex";
const FIRMWARE_21EC: &str = "BCM20702A1_001.002.014.1443.1600.hex";

fn packaged_folders() -> TestFolders {
    let folders = TestFolders::new();
    folders.write_inf(SAMPLE_INF);
    folders.write_firmware(FIRMWARE_21E8, b"payload for 21e8");
    folders.write_firmware(FIRMWARE_21EC, b"payload for 21ec");
    let output = folders.run();
    assert!(
        output.status.success(),
        "packaging failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    folders
}

#[test]
fn test_compressed_firmware_written_per_device() {
    let folders = packaged_folders();
    assert!(folders
        .output_path("0a5c_21e8/BCM20702A1_001.002.014.1443.1572_v5668.zhx")
        .exists());
    assert!(folders
        .output_path("0a5c_21ec/BCM20702A1_001.002.014.1443.1600_v5696.zhx")
        .exists());
}

#[test]
fn test_latest_links_created_at_output_root() {
    let folders = packaged_folders();
    for name in [
        "BCM20702A1_001.002.014.1443.1572_v5668.zhx",
        "BCM20702A1_001.002.014.1443.1600_v5696.zhx",
    ] {
        let link = folders.output_path(name);
        assert!(
            std::fs::symlink_metadata(&link).is_ok(),
            "missing link {name}"
        );
    }
}

#[test]
fn test_injector_kexts_emitted_for_both_stacks() {
    let folders = packaged_folders();
    for kext in [
        "0a5c_21e8/BrcmFirmwareInjector_0a5c_21e8.kext",
        "0a5c_21e8/BrcmFirmwareInjector2_0a5c_21e8.kext",
    ] {
        let plist_path = folders.output_path(kext).join("Contents/Info.plist");
        assert!(plist_path.exists(), "missing {kext}");
        Value::from_file(&plist_path).expect("injector plist should parse");
    }
}

#[test]
fn test_manifest_lists_all_resolved_devices() {
    let folders = packaged_folders();
    let value = Value::from_file(folders.output_path("firmwares.plist")).unwrap();
    let root = value.as_dictionary().unwrap();
    assert!(root.contains_key("0a5c_21e8"));
    assert!(root.contains_key("0a5c_21ec"));
    // The non-Windows-10 declaration never became a device
    assert_eq!(root.len(), 2);

    let entry = root.get("0a5c_21e8").and_then(Value::as_dictionary).unwrap();
    assert_eq!(
        entry.get("DisplayName").and_then(Value::as_string),
        Some("Broadcom Bluetooth")
    );
    assert_eq!(
        entry.get("idVendor").and_then(Value::as_signed_integer),
        Some(0x0a5c)
    );
}

#[test]
fn test_index_lists_devices_and_versions() {
    let folders = packaged_folders();
    let index =
        std::fs::read_to_string(folders.output_path("firmwares.md")).unwrap();
    assert!(index.contains("* [0a5c:21e8] 20702A1 dongles (Broadcom Bluetooth)"));
    assert!(index.contains("  * v5668 - BCM20702A1_001.002.014.1443.1572_v5668.zhx"));
    assert!(index.contains("* [0a5c:21ec]"));
}

#[test]
fn test_unreferenced_firmware_is_skipped_not_fatal() {
    let folders = TestFolders::new();
    folders.write_inf(SAMPLE_INF);
    folders.write_firmware(FIRMWARE_21E8, b"payload");
    folders.write_firmware("BCM_unreferenced_0001.hex", b"stray");

    let output = folders.run();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 skipped"), "stdout: {stdout}");
}

#[test]
fn test_rerun_produces_identical_compressed_bytes() {
    let folders = TestFolders::new();
    folders.write_inf(SAMPLE_INF);
    folders.write_firmware(FIRMWARE_21E8, b"payload for 21e8");

    assert!(folders.run().status.success());
    let packaged =
        folders.output_path("0a5c_21e8/BCM20702A1_001.002.014.1443.1572_v5668.zhx");
    let first = std::fs::read(&packaged).unwrap();

    assert!(folders.run().status.success());
    assert_eq!(std::fs::read(&packaged).unwrap(), first);
}
