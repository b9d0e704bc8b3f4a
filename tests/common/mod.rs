//! Common test utilities and helpers
//!
//! Shared fixtures for the integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test folder pair for packaging runs
///
/// Creates temporary input and output directories and provides utilities
/// for setting up firmware fixtures.
pub struct TestFolders {
    /// Input folder (INF file + raw firmwares)
    pub input: TempDir,
    /// Output folder for the packaged distribution
    pub output: TempDir,
}

impl TestFolders {
    /// Create a fresh input/output folder pair
    pub fn new() -> Self {
        Self {
            input: TempDir::new().expect("Failed to create temp input directory"),
            output: TempDir::new().expect("Failed to create temp output directory"),
        }
    }

    /// Write the vendor INF file into the input folder
    pub fn write_inf(&self, content: &str) {
        std::fs::write(self.input.path().join("bcbtums.inf"), content)
            .expect("Failed to write INF file");
    }

    /// Write a raw firmware blob into the input folder
    pub fn write_firmware(&self, name: &str, content: &[u8]) {
        std::fs::write(self.input.path().join(name), content)
            .expect("Failed to write firmware file");
    }

    /// Path inside the output folder
    #[allow(dead_code)]
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output.path().join(name)
    }

    /// Run the brcmfw binary against the folder pair
    pub fn run(&self) -> Output {
        Command::new(env!("CARGO_BIN_EXE_brcmfw"))
            .arg(self.input.path())
            .arg(self.output.path())
            .output()
            .expect("Failed to execute brcmfw")
    }
}

impl Default for TestFolders {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample vendor INF covering one device with firmware, description, and a
/// declaration outside the Windows 10 block
#[allow(dead_code)]
pub const SAMPLE_INF: &str = "\
[Version]\r\n\
Signature=\"$WINDOWS NT$\"\r\n\
\r\n\
[Broadcom.NTamd64.10.0]\r\n\
%BRCM20702.DeviceDesc%=BlueRAMUSB21E8,          USB\\VID_0A5C&PID_21E8       ; 20702A1 dongles\r\n\
%BRCM20702.DeviceDesc%=BlueRAMUSB21EC,          USB\\VID_0A5C&PID_21EC       ; 20702A1 dongles\r\n\
\r\n\
[Broadcom.NTamd64.6.3]\r\n\
%BRCM20702.DeviceDesc%=BlueRAMUSB99999,         USB\\VID_0A5C&PID_9999       ; not Windows 10\r\n\
\r\n\
[RAMUSB21E8.CopyList]\r\n\
bcbtums.sys\r\n\
BCM20702A1_001.002.014.1443.1572.hex\r\n\
\r\n\
[RAMUSB21EC.CopyList]\r\n\
bcbtums.sys\r\n\
BCM20702A1_001.002.014.1443.1600.hex\r\n\
\r\n\
[Strings]\r\n\
BRCM20702.DeviceDesc=\"Broadcom Bluetooth\"\r\n\
";
