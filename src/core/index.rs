//! Human-readable firmware index emitter
//!
//! Writes `firmwares.md`: one bullet per device whose output folder exists
//! on disk, with a nested line for each packaged `.zhx` found there.

use std::fmt::Write as _;
use std::path::Path;

use crate::config::{COMPRESSED_EXTENSION, INDEX_FILE_NAME};
use crate::core::device::Device;
use crate::core::packager::version_suffix;
use crate::error::EmitError;
use crate::infra::filesystem;

/// Write the firmware index into the output folder
pub fn write_index(devices: &[Device], output: &Path) -> Result<(), EmitError> {
    let mut sorted: Vec<&Device> = devices.iter().collect();
    sorted.sort_by_key(|d| (d.vendor_id, d.product_id));

    let mut index = String::new();
    for device in sorted {
        let device_dir = output.join(device.folder_name());
        if !device_dir.is_dir() {
            continue;
        }
        let _ = writeln!(
            index,
            "* [{:04x}:{:04x}] {} ({})",
            device.vendor_id,
            device.product_id,
            device.comment,
            device.description.as_deref().unwrap_or_default()
        );
        for name in packaged_firmwares(&device_dir) {
            let _ = writeln!(index, "  * v{} - {name}", version_suffix(&name));
        }
    }

    filesystem::write_file(&output.join(INDEX_FILE_NAME), index.as_bytes())?;
    Ok(())
}

/// Packaged firmware filenames in a device folder, sorted by name
fn packaged_firmwares(device_dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(device_dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(&format!(".{COMPRESSED_EXTENSION}")))
        .collect();
    names.sort();
    names
}
