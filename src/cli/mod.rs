//! Command-line interface module
//!
//! Argument parsing and the packaging pipeline. The business logic lives in
//! [`crate::core`].

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::INF_FILE_NAME;
use crate::core::index::write_index;
use crate::core::manifest::write_manifest;
use crate::core::packager::package_firmwares;
use crate::core::registry::parse_inf;

/// Brcmfw - Broadcom PatchRAM firmware packager
///
/// Parses a vendor Windows INF file, compresses the raw firmware blobs next
/// to it, and emits a versioned firmware distribution: per-device folders,
/// latest-version symlinks, injector kexts, a plist manifest, and a
/// human-readable index.
#[derive(Parser, Debug)]
#[command(name = "brcmfw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folder containing the vendor INF file and the raw .hex firmwares
    pub input: PathBuf,

    /// Destination folder for the packaged firmware distribution
    pub output: PathBuf,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Execute the packaging pipeline
    pub fn run(self) -> Result<()> {
        let inf_path = self.input.join(INF_FILE_NAME);
        let devices = parse_inf(&inf_path)
            .with_context(|| format!("Failed to parse {}", inf_path.display()))?;
        tracing::info!("Parsed {} device(s) from {INF_FILE_NAME}", devices.len());

        // Vendor/product pairs are the effective identity for output folder
        // naming; the INF does not guarantee uniqueness
        let mut seen = HashSet::new();
        for device in &devices {
            if !seen.insert(device.folder_name()) {
                tracing::warn!(
                    "Multiple devices share identity [{}], later packaging overwrites earlier output",
                    device.folder_name()
                );
            }
        }

        let stats = package_firmwares(&devices, &self.input, &self.output)
            .context("Failed to package firmwares")?;
        write_manifest(&devices, &self.output).context("Failed to write firmware manifest")?;
        write_index(&devices, &self.output).context("Failed to write firmware index")?;

        if !self.quiet {
            println!(
                "✓ Packaged {} firmware(s) into {} ({} skipped)",
                stats.packaged,
                self.output.display(),
                stats.skipped
            );
        }
        Ok(())
    }
}
