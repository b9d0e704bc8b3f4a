//! Error types for brcmfw
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// INF parsing errors
#[derive(Error, Debug)]
pub enum InfError {
    /// INF file not found in the input folder
    #[error("INF file not found: {path}")]
    NotFound { path: PathBuf },

    /// IO error while reading the INF file
    #[error("Failed to read INF file '{path}': {error}")]
    Read { path: PathBuf, error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to write file
    #[error("Failed to write file '{path}': {error}")]
    WriteFile { path: PathBuf, error: String },

    /// Failed to read file
    #[error("Failed to read file '{path}': {error}")]
    ReadFile { path: PathBuf, error: String },

    /// Failed to create symlink
    #[error("Failed to create link '{path}': {error}")]
    CreateLink { path: PathBuf, error: String },
}

/// Plist emission errors
#[derive(Error, Debug)]
pub enum EmitError {
    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Plist serialization error
    #[error("Failed to serialize property list '{path}': {error}")]
    Plist { path: PathBuf, error: String },
}

/// Firmware packaging errors
#[derive(Error, Debug)]
pub enum PackageError {
    /// Filesystem error
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// Compression error
    #[error("Failed to compress '{file}': {error}")]
    Compress { file: String, error: String },

    /// Injector emission error
    #[error(transparent)]
    Emit(#[from] EmitError),
}
