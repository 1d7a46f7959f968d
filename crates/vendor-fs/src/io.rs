//! Plain text I/O for generated artifacts
//!
//! Generated files are rewritten in full with a direct overwrite. There is
//! no temp-file-then-rename step, so a failed write can leave a truncated
//! file behind; callers serialize operations on shared files.

use std::fs;
use std::io::ErrorKind;

use crate::{Error, NormalizedPath, Result};

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content, treating a missing file as `None`.
pub fn read_text_if_exists(path: &NormalizedPath) -> Result<Option<String>> {
    let native_path = path.to_native();
    match fs::read_to_string(&native_path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Overwrite a file with `content`, creating parent directories as needed.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    fs::write(&native_path, content).map_err(|e| Error::io(&native_path, e))
}

/// Remove a file if it exists. Returns whether a file was removed.
pub fn remove_file_if_exists(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_file(&native_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Remove a directory only when it exists and has no entries left.
pub fn remove_dir_if_empty(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    let mut entries = match fs::read_dir(&native_path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::io(&native_path, e)),
    };
    if entries.next().is_some() {
        tracing::debug!(path = %path, "Directory not empty, leaving in place");
        return Ok(false);
    }
    fs::remove_dir(&native_path).map_err(|e| Error::io(&native_path, e))?;
    Ok(true)
}
