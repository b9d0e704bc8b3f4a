//! Device records built from the vendor INF
//!
//! A [`Device`] is created when its declaration line is seen and is mutated
//! up to twice more during the scan (firmware filename, description). After
//! the scan it is read-only.

/// One USB device declared in the vendor INF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Description-string identifier (e.g. `BRCM20702.DeviceDesc`),
    /// case-insensitive match key for the string section
    pub string_key: String,

    /// Device-block suffix (e.g. `RAMUSB21E8`), case-insensitive match key
    /// for the copy-list section
    pub device_key: String,

    /// USB vendor id
    pub vendor_id: u16,

    /// USB product id
    pub product_id: u16,

    /// Trailing free-text comment from the declaration line
    pub comment: String,

    /// Base filename of the associated `.hex` blob, once resolved
    pub firmware: Option<String>,

    /// Firmware version derived from the filename, once resolved
    pub firmware_version: Option<u32>,

    /// Human-readable description, once resolved from the string section
    pub description: Option<String>,
}

impl Device {
    /// Create a device from its declaration-line fields
    pub fn new(
        string_key: String,
        device_key: String,
        vendor_id: u16,
        product_id: u16,
        comment: String,
    ) -> Self {
        Self {
            string_key,
            device_key,
            vendor_id,
            product_id,
            comment,
            firmware: None,
            firmware_version: None,
            description: None,
        }
    }

    /// Output folder name, `<vid>_<pid>` in lowercase zero-padded hex.
    /// This is the effective identity key for packaging.
    pub fn folder_name(&self) -> String {
        format!("{:04x}_{:04x}", self.vendor_id, self.product_id)
    }

    /// Firmware key used by injector kexts: `<vid>_<pid>_v<version>`
    pub fn firmware_key(&self) -> Option<String> {
        self.firmware_version
            .map(|v| format!("{}_v{v}", self.folder_name()))
    }

    /// Firmware filename stem, without the `.hex` extension
    pub fn firmware_stem(&self) -> Option<&str> {
        self.firmware
            .as_deref()
            .map(|f| f.strip_suffix(".hex").unwrap_or(f))
    }
}
