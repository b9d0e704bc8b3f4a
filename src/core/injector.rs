//! Injector bundle emitter
//!
//! For each packaged device, emits two kext-shaped bundle descriptors, one
//! per USB stack generation, each embedding the compressed firmware payload
//! inline as plist data. The bundles are matching metadata only; nothing in
//! them is executable.

use std::path::Path;

use plist::{Dictionary, Value};

use crate::config::{
    FIRMWARE_STORE_BUNDLE_IDENTIFIER, FIRMWARE_STORE_CLASS, FIRMWARE_STORE_PROVIDER_CLASS,
    INJECTOR_BUNDLE_VERSION, INJECTOR_PROBE_SCORE,
};
use crate::core::device::Device;
use crate::error::EmitError;
use crate::infra::filesystem;

/// USB stack generation an injector targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackVariant {
    /// Legacy IOUSBFamily stack
    Legacy,
    /// IOUSBHostFamily stack (10.11+)
    Host,
}

impl StackVariant {
    /// Patching kext class name for this stack
    fn patch_class(self) -> &'static str {
        match self {
            Self::Legacy => "BrcmPatchRAM",
            Self::Host => "BrcmPatchRAM2",
        }
    }

    /// IOKit provider class the personality matches on
    fn provider_class(self) -> &'static str {
        match self {
            Self::Legacy => "IOUSBDevice",
            Self::Host => "IOUSBHostDevice",
        }
    }

    /// Bundle identifier of the patching kext
    fn patch_bundle_identifier(self) -> &'static str {
        match self {
            Self::Legacy => "com.no-one.BrcmPatchRAM",
            Self::Host => "com.no-one.BrcmPatchRAM2",
        }
    }

    /// Kext directory name for this variant and device
    fn kext_name(self, device: &Device) -> String {
        let suffix = match self {
            Self::Legacy => "",
            Self::Host => "2",
        };
        format!(
            "BrcmFirmwareInjector{suffix}_{:04x}_{:04x}.kext",
            device.vendor_id, device.product_id
        )
    }
}

/// Emit both injector variants for a packaged device into its output folder
pub fn write_injectors(
    device: &Device,
    compressed: &[u8],
    device_dir: &Path,
) -> Result<(), EmitError> {
    for variant in [StackVariant::Legacy, StackVariant::Host] {
        let plist = injector_plist(device, variant, compressed);
        let path = device_dir
            .join(variant.kext_name(device))
            .join("Contents/Info.plist");

        let mut xml = Vec::new();
        plist
            .to_writer_xml(&mut xml)
            .map_err(|e| EmitError::Plist {
                path: path.clone(),
                error: e.to_string(),
            })?;
        filesystem::write_file(&path, &xml)?;
        tracing::debug!("Wrote injector {}", path.display());
    }
    Ok(())
}

/// Build the Info.plist tree for one injector variant
fn injector_plist(device: &Device, variant: StackVariant, compressed: &[u8]) -> Value {
    let identity = device.folder_name();
    let firmware_key = device
        .firmware_key()
        .unwrap_or_else(|| format!("{identity}_v0"));

    let mut personality = Dictionary::new();
    personality.insert(
        "CFBundleIdentifier".into(),
        Value::String(variant.patch_bundle_identifier().into()),
    );
    personality.insert(
        "DisplayName".into(),
        Value::String(device.description.clone().unwrap_or_default()),
    );
    personality.insert("FirmwareKey".into(), Value::String(firmware_key.clone()));
    personality.insert(
        "IOClass".into(),
        Value::String(variant.patch_class().into()),
    );
    personality.insert(
        "IOMatchCategory".into(),
        Value::String(variant.patch_class().into()),
    );
    personality.insert(
        "IOProbeScore".into(),
        Value::Integer(INJECTOR_PROBE_SCORE.into()),
    );
    personality.insert(
        "IOProviderClass".into(),
        Value::String(variant.provider_class().into()),
    );
    personality.insert(
        "idProduct".into(),
        Value::Integer(i64::from(device.product_id).into()),
    );
    personality.insert(
        "idVendor".into(),
        Value::Integer(i64::from(device.vendor_id).into()),
    );

    let mut firmwares = Dictionary::new();
    firmwares.insert(firmware_key, Value::Data(compressed.to_vec()));

    let mut store = Dictionary::new();
    store.insert(
        "CFBundleIdentifier".into(),
        Value::String(FIRMWARE_STORE_BUNDLE_IDENTIFIER.into()),
    );
    store.insert("Firmwares".into(), Value::Dictionary(firmwares));
    store.insert("IOClass".into(), Value::String(FIRMWARE_STORE_CLASS.into()));
    store.insert(
        "IOMatchCategory".into(),
        Value::String(FIRMWARE_STORE_CLASS.into()),
    );
    store.insert(
        "IOProbeScore".into(),
        Value::Integer(INJECTOR_PROBE_SCORE.into()),
    );
    store.insert(
        "IOProviderClass".into(),
        Value::String(FIRMWARE_STORE_PROVIDER_CLASS.into()),
    );

    let mut personalities = Dictionary::new();
    personalities.insert(identity.clone(), Value::Dictionary(personality));
    personalities.insert("BrcmFirmwareStore".into(), Value::Dictionary(store));

    let mut root = Dictionary::new();
    root.insert(
        "CFBundleIdentifier".into(),
        Value::String(format!(
            "com.no-one.BrcmInjector.{:04x}.{:04x}",
            device.vendor_id, device.product_id
        )),
    );
    root.insert(
        "CFBundleInfoDictionaryVersion".into(),
        Value::String("6.0".into()),
    );
    root.insert(
        "CFBundleName".into(),
        Value::String(format!(
            "BrcmInjector.{:04x}.{:04x}",
            device.vendor_id, device.product_id
        )),
    );
    root.insert("CFBundlePackageType".into(), Value::String("KEXT".into()));
    root.insert(
        "CFBundleShortVersionString".into(),
        Value::String(INJECTOR_BUNDLE_VERSION.into()),
    );
    root.insert("CFBundleSignature".into(), Value::String("????".into()));
    root.insert(
        "CFBundleVersion".into(),
        Value::String(INJECTOR_BUNDLE_VERSION.into()),
    );
    root.insert(
        "IOKitPersonalities".into(),
        Value::Dictionary(personalities),
    );
    Value::Dictionary(root)
}
