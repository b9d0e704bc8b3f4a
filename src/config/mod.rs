//! Fixed constants
//!
//! File names, match prefixes, and the property-list literals reproduced
//! bit-exact for compatibility with the consuming kernel extension.

/// Name of the vendor INF file expected inside the input folder
pub const INF_FILE_NAME: &str = "bcbtums.inf";

/// Extension of raw firmware blobs in the input folder
pub const FIRMWARE_EXTENSION: &str = "hex";

/// Extension of compressed firmware blobs in the output folder
pub const COMPRESSED_EXTENSION: &str = "zhx";

/// Bias added to the 4-digit firmware number, separating the numbering
/// spaces of the two firmware generations
pub const FIRMWARE_VERSION_BIAS: u32 = 4096;

/// Firmware files with this prefix hang the chipset on boot and are
/// removed from the registry entirely
pub const EXCLUDED_FIRMWARE_PREFIX: &str = "BCM4350C5";

/// File name of the aggregate firmware manifest
pub const MANIFEST_FILE_NAME: &str = "firmwares.plist";

/// File name of the human-readable firmware index
pub const INDEX_FILE_NAME: &str = "firmwares.md";

/// Bundle identifier emitted into manifest entries
pub const MANIFEST_BUNDLE_IDENTIFIER: &str = "com.no-one.$(PRODUCT_NAME:rfc1034identifier)";

/// IOClass / IOMatchCategory emitted into manifest entries
pub const MANIFEST_IO_CLASS: &str = "BrcmPatchRAM";

/// IOProviderClass emitted into manifest entries
pub const MANIFEST_PROVIDER_CLASS: &str = "IOUSBDevice";

/// Bundle version stamped into injector kexts
pub const INJECTOR_BUNDLE_VERSION: &str = "2.1.0";

/// IOProbeScore stamped into injector personalities
pub const INJECTOR_PROBE_SCORE: i64 = 2000;

/// Firmware-store personality class in injector kexts
pub const FIRMWARE_STORE_CLASS: &str = "BrcmFirmwareStore";

/// Firmware-store bundle identifier in injector kexts
pub const FIRMWARE_STORE_BUNDLE_IDENTIFIER: &str = "com.no-one.BrcmFirmwareStore";

/// Firmware-store provider class; disabled so the store never matches on
/// its own, the patching kext instantiates it directly
pub const FIRMWARE_STORE_PROVIDER_CLASS: &str = "disabled_IOResources";
