//! # RWeb Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` used by the configuration store: making sure
//! the `.rweb/` directory exists before a config file is written, and reading
//! or writing whole files with the offending path attached to any error.
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a regular file.
//! - **`read_file_to_string`**: `fs::read_to_string` with context.
//! - **`write_string_to_file`**: creates the parent directory, then writes
//!   (replacing any existing content). Callers decide whether overwriting is allowed.
//!
use crate::core::error::{Result, RwebError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path, creating it and
/// any missing parents.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if the
/// directory cannot be created.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        info!("Created directory: {}", path.display());
    } else if !path.is_dir() {
        anyhow::bail!(RwebError::FileSystem(format!(
            "Path exists but is not a directory: {}",
            path.display()
        )));
    } else {
        debug!("Directory already exists: {}", path.display());
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}

/// Writes string content to `path`, creating the parent directory first.
/// An existing file is replaced.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    // An empty parent means a bare file name relative to the cwd.
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file {}", path.display()))?;
    info!("Wrote content to file: {}", path.display());
    Ok(())
}
