//! Aggregate firmware manifest emitter
//!
//! Writes `firmwares.plist`, one dictionary entry per device with resolved
//! firmware, keyed `<vid>_<pid>`, sorted by vendor and product id.

use std::path::Path;

use plist::{Dictionary, Value};

use crate::config::{
    MANIFEST_BUNDLE_IDENTIFIER, MANIFEST_FILE_NAME, MANIFEST_IO_CLASS, MANIFEST_PROVIDER_CLASS,
};
use crate::core::device::Device;
use crate::error::EmitError;
use crate::infra::filesystem;

/// Write the aggregate manifest into the output folder
///
/// Devices lacking a resolved firmware are logged and excluded.
pub fn write_manifest(devices: &[Device], output: &Path) -> Result<(), EmitError> {
    let mut sorted: Vec<&Device> = devices.iter().collect();
    sorted.sort_by_key(|d| (d.vendor_id, d.product_id));

    let mut root = Dictionary::new();
    for device in sorted {
        let (Some(stem), Some(version)) = (device.firmware_stem(), device.firmware_version)
        else {
            tracing::warn!(
                "Device [{}] has no resolved firmware, excluded from manifest",
                device.folder_name()
            );
            continue;
        };
        root.insert(device.folder_name(), manifest_entry(device, stem, version));
    }

    let path = output.join(MANIFEST_FILE_NAME);
    let mut xml = Vec::new();
    Value::Dictionary(root)
        .to_writer_xml(&mut xml)
        .map_err(|e| EmitError::Plist {
            path: path.clone(),
            error: e.to_string(),
        })?;
    filesystem::write_file(&path, &xml)?;
    Ok(())
}

fn manifest_entry(device: &Device, stem: &str, version: u32) -> Value {
    let mut entry = Dictionary::new();
    entry.insert(
        "CFBundleIdentifier".into(),
        Value::String(MANIFEST_BUNDLE_IDENTIFIER.into()),
    );
    entry.insert(
        "DisplayName".into(),
        Value::String(device.description.clone().unwrap_or_default()),
    );
    entry.insert(
        "FirmwareKey".into(),
        Value::String(format!("{stem}_v{version}")),
    );
    entry.insert("IOClass".into(), Value::String(MANIFEST_IO_CLASS.into()));
    entry.insert(
        "IOMatchCategory".into(),
        Value::String(MANIFEST_IO_CLASS.into()),
    );
    entry.insert(
        "IOProviderClass".into(),
        Value::String(MANIFEST_PROVIDER_CLASS.into()),
    );
    entry.insert(
        "idProduct".into(),
        Value::Integer(i64::from(device.product_id).into()),
    );
    entry.insert(
        "idVendor".into(),
        Value::Integer(i64::from(device.vendor_id).into()),
    );
    Value::Dictionary(entry)
}
