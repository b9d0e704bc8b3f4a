//! Core business logic module
//!
//! # Submodules
//!
//! - [`device`] - Device records built from the vendor INF
//! - [`scanner`] - INF line scanning and classification
//! - [`registry`] - Single-pass device registry builder
//! - [`packager`] - Firmware compression and packaging
//! - [`injector`] - Per-device injector kext emission
//! - [`manifest`] - Aggregate `firmwares.plist` emission
//! - [`index`] - Human-readable `firmwares.md` emission

pub mod device;
pub mod index;
pub mod injector;
pub mod manifest;
pub mod packager;
pub mod registry;
pub mod scanner;
