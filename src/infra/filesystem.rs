//! Filesystem operations
//!
//! Handles file, directory, and symlink operations.

use std::path::Path;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Write bytes to a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &[u8]) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read the raw bytes of a file
pub fn read_file(path: &Path) -> Result<Vec<u8>, FilesystemError> {
    std::fs::read(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Create a symbolic link at `link` pointing at `target`
///
/// On platforms without symlinks the target file is copied instead, which
/// preserves the "latest firmware" semantics if not the link itself.
#[cfg(unix)]
pub fn create_link(target: &Path, link: &Path) -> Result<(), FilesystemError> {
    std::os::unix::fs::symlink(target, link).map_err(|e| FilesystemError::CreateLink {
        path: link.to_path_buf(),
        error: e.to_string(),
    })
}

#[cfg(not(unix))]
pub fn create_link(target: &Path, link: &Path) -> Result<(), FilesystemError> {
    let resolved = link
        .parent()
        .map_or_else(|| target.to_path_buf(), |p| p.join(target));
    std::fs::copy(&resolved, link)
        .map(|_| ())
        .map_err(|e| FilesystemError::CreateLink {
            path: link.to_path_buf(),
            error: e.to_string(),
        })
}

/// Check whether a path exists, without following symlinks
///
/// `Path::exists` traverses links and reports false for a dangling symlink,
/// which would let a stale link be silently overwritten.
pub fn link_or_file_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
