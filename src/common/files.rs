//! Utilities for file operations with automatic parent directory creation.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::NamedTempFile;

/// Mode given to files that did not exist before.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Write a file atomically, creating parent directories as needed.
///
/// The content goes to a temporary file next to `path` which is then renamed
/// over the target, so readers never observe a half-written file. An existing
/// target keeps its permission bits; new files get [`DEFAULT_FILE_MODE`].
///
/// # Arguments
/// * `path` - Path to the file to write
/// * `content` - Content to write (anything that implements AsRef<[u8]>)
pub fn write_file_atomic<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {}", parent.display()))?;

    let permissions = match fs::metadata(path) {
        Ok(metadata) => metadata.permissions(),
        Err(_) => fs::Permissions::from_mode(DEFAULT_FILE_MODE),
    };

    let mut file = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    file.write_all(content.as_ref())?;
    file.as_file().sync_all()?;
    file.as_file().set_permissions(permissions)?;
    file.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
