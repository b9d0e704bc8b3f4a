//! Device registry builder
//!
//! Correlates the three non-adjacent INF record kinds (device declarations,
//! copy-list sections, description strings) into [`Device`] records in one
//! linear pass over the line stream.
//!
//! Declarations only count inside the Windows 10 driver block. Copy-list
//! headers and description strings are honored regardless of block state,
//! and only resolve against devices registered so far, matching the natural
//! INF ordering where declarations precede detail sections.

use std::path::Path;

use crate::config::{EXCLUDED_FIRMWARE_PREFIX, FIRMWARE_VERSION_BIAS};
use crate::core::device::Device;
use crate::core::scanner::{InfLine, LineClassifier, LineScanner};
use crate::error::InfError;

/// Driver-block scan state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Outside,
    Inside,
}

/// Single-pass registry builder
///
/// Feed lines in file order; [`finish`](Self::finish) yields the devices in
/// declaration order.
pub struct RegistryBuilder {
    classifier: LineClassifier,
    devices: Vec<Device>,
    block: BlockState,
    /// Device awaiting the first firmware line of the current copy-list
    /// section, as an index into `devices`
    pending_firmware: Option<usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
            devices: Vec::new(),
            block: BlockState::Outside,
            pending_firmware: None,
        }
    }

    /// Process one line of INF text
    pub fn feed(&mut self, line: &str) {
        match self.classifier.classify(line) {
            InfLine::BlockStart => self.block = BlockState::Inside,
            InfLine::BlockEnd => self.block = BlockState::Outside,
            InfLine::Declaration {
                string_key,
                device_key,
                vendor_id,
                product_id,
                comment,
            } => {
                // Declarations outside the Windows 10 block belong to other
                // OS sections and must not create devices
                if self.block == BlockState::Inside {
                    self.devices.push(Device::new(
                        string_key, device_key, vendor_id, product_id, comment,
                    ));
                }
            }
            InfLine::CopyListHeader { device_key } => {
                // Most recently registered device wins when keys repeat
                self.pending_firmware = self
                    .devices
                    .iter()
                    .rposition(|d| d.device_key.eq_ignore_ascii_case(&device_key));
            }
            InfLine::FirmwareFile { filename } => {
                // Only the first firmware line per copy-list section is taken
                if let Some(index) = self.pending_firmware.take() {
                    self.resolve_firmware(index, filename);
                }
            }
            InfLine::Description { string_key, text } => {
                // One string key may map to multiple device records
                for device in self
                    .devices
                    .iter_mut()
                    .filter(|d| d.string_key.eq_ignore_ascii_case(&string_key))
                {
                    device.description = Some(text.clone());
                }
            }
            InfLine::Unrecognized => {}
        }
    }

    fn resolve_firmware(&mut self, index: usize, filename: String) {
        // Known-bad firmware hangs the chipset; drop the device before it is
        // used anywhere else
        if filename.starts_with(EXCLUDED_FIRMWARE_PREFIX) {
            let device = self.devices.remove(index);
            tracing::warn!(
                "Excluding device [{}] with known-bad firmware {filename}",
                device.folder_name()
            );
            return;
        }
        let device = &mut self.devices[index];
        device.firmware_version = firmware_version(&filename);
        device.firmware = Some(filename);
    }

    /// Consume the builder, yielding devices in declaration order
    pub fn finish(self) -> Vec<Device> {
        self.devices
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the firmware version from a firmware filename: the decimal value
/// of the last 4 digits of the stem, plus the generation bias
pub fn firmware_version(filename: &str) -> Option<u32> {
    let stem = filename.strip_suffix(".hex").unwrap_or(filename);
    let digits = stem.get(stem.len().checked_sub(4)?..)?;
    digits.parse::<u32>().ok().map(|v| v + FIRMWARE_VERSION_BIAS)
}

/// Parse the vendor INF file into device records
pub fn parse_inf(path: &Path) -> Result<Vec<Device>, InfError> {
    let mut builder = RegistryBuilder::new();
    for line in LineScanner::open(path)? {
        builder.feed(&line?);
    }
    Ok(builder.finish())
}
