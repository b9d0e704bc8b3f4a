//! Brcmfw - Broadcom PatchRAM firmware packager
//!
//! This library converts a vendor-supplied Windows INF driver description
//! plus a directory of raw `.hex` firmware blobs into a packaged, versioned
//! firmware distribution consumable by the BrcmPatchRAM kernel extension.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and the packaging pipeline
//! - [`core`] - Business logic: INF parsing, packaging, plist emission
//! - [`infra`] - Infrastructure layer (filesystem side effects)
//! - [`config`] - Fixed constants (file names, plist literals)
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
