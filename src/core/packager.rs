//! Firmware packager
//!
//! Matches raw `.hex` firmware files against the device registry,
//! compresses them, and writes versioned `.zhx` files into per-device
//! output folders, maintaining a top-level "latest version" symlink per
//! device and emitting the injector kexts alongside.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use walkdir::WalkDir;

use crate::config::{COMPRESSED_EXTENSION, FIRMWARE_EXTENSION};
use crate::core::device::Device;
use crate::core::injector;
use crate::error::PackageError;
use crate::infra::filesystem;

/// Packaging statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PackageStats {
    /// Number of firmware files packaged
    pub packaged: usize,
    /// Number of firmware files skipped
    pub skipped: usize,
}

/// Compress firmware bytes with zlib-wrapped DEFLATE at best compression
///
/// This matches what the consuming kernel extension inflates; the level is
/// fixed so repackaging the same input yields byte-identical output.
pub fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Trailing version substring of a packaged firmware filename, used for the
/// lexicographic "latest version" ordering
pub fn version_suffix(name: &str) -> &str {
    let stem = name.strip_suffix(".zhx").unwrap_or(name);
    stem.rsplit_once("_v").map_or(stem, |(_, suffix)| suffix)
}

/// Package all firmware files from `input` into `output`
///
/// Each `.hex` file without a matching device is logged and skipped; this
/// is not fatal.
pub fn package_firmwares(
    devices: &[Device],
    input: &Path,
    output: &Path,
) -> Result<PackageStats, PackageError> {
    filesystem::create_dir_all(output)?;
    clear_stale_links(output);

    let mut stats = PackageStats::default();
    for hex_path in hex_files(input) {
        let basename = hex_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(device) = devices.iter().find(|d| {
            d.firmware
                .as_deref()
                .is_some_and(|f| f.eq_ignore_ascii_case(&basename))
        }) else {
            tracing::warn!(
                "Firmware file {basename} is not matched against devices in INF file, skipping"
            );
            stats.skipped += 1;
            continue;
        };
        let Some(version) = device.firmware_version else {
            tracing::warn!("Firmware file {basename} has no parsable version, skipping");
            stats.skipped += 1;
            continue;
        };

        let raw = filesystem::read_file(&hex_path)?;
        let compressed = compress(&raw).map_err(|e| PackageError::Compress {
            file: basename.clone(),
            error: e.to_string(),
        })?;

        let stem = hex_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| basename.clone());
        let output_name = format!("{stem}_v{version}.{COMPRESSED_EXTENSION}");
        let folder_name = device.folder_name();
        let device_dir = output.join(&folder_name);
        filesystem::write_file(&device_dir.join(&output_name), &compressed)?;
        tracing::info!(
            "Compressed firmware {output_name} ({} --> {})",
            raw.len(),
            compressed.len()
        );

        update_latest_link(output, &folder_name, &device_dir)?;
        injector::write_injectors(device, &compressed, &device_dir)?;
        stats.packaged += 1;
    }
    Ok(stats)
}

/// All `.hex` files directly inside the input folder, sorted by name
fn hex_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| {
            p.extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(FIRMWARE_EXTENSION))
        })
        .collect();
    files.sort();
    files
}

/// Remove stale top-level `.zhx` links from a previous run, best effort
fn clear_stale_links(output: &Path) {
    let Ok(entries) = std::fs::read_dir(output) else {
        return;
    };
    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name();
        if name
            .to_string_lossy()
            .ends_with(&format!(".{COMPRESSED_EXTENSION}"))
        {
            let _ = std::fs::remove_file(entry.path());
        }
    }
}

/// (Re)point the top-level symlink at the latest firmware in the device
/// folder, skipping with a warning when the name is already taken
fn update_latest_link(
    output: &Path,
    folder_name: &str,
    device_dir: &Path,
) -> Result<(), PackageError> {
    let Some(latest) = latest_firmware(device_dir) else {
        return Ok(());
    };
    let link = output.join(&latest);
    if filesystem::link_or_file_exists(&link) {
        tracing::warn!("Firmware symlink {latest} already created for another device");
        return Ok(());
    }
    let target = Path::new(".").join(folder_name).join(&latest);
    filesystem::create_link(&target, &link)?;
    Ok(())
}

/// Latest `.zhx` filename in a device folder: lexicographically greatest by
/// trailing version suffix. The ordering is deliberate and must not be
/// replaced by a numeric sort.
fn latest_firmware(device_dir: &Path) -> Option<String> {
    let entries = std::fs::read_dir(device_dir).ok()?;
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(&format!(".{COMPRESSED_EXTENSION}")))
        .collect();
    names.sort_by(|a, b| version_suffix(b).cmp(version_suffix(a)));
    names.into_iter().next()
}
