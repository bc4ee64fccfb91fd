//! Fstab command - strips root and boot mounts from a mount table.

use anyhow::{bail, Result};
use std::path::PathBuf;

use bootprep::config::{Config, ROOT_DIR_VAR};
use bootprep::fstab;

/// Execute the fstab command.
///
/// Inside the image pipeline the configured root filesystem's fstab is
/// always the target; `path` is only used when no root is configured.
pub fn cmd_fstab(path: Option<PathBuf>, config: &Config) -> Result<()> {
    let Some(path) = config.root_fstab().or(path) else {
        bail!("No fstab given. Pass a path or set {ROOT_DIR_VAR}.");
    };

    let filtered = fstab::filter_file(&path)?;
    for line in &filtered.removed {
        println!("  removed: {line}");
    }
    println!(
        "Rewrote {} ({} kept, {} removed)",
        path.display(),
        filtered.kept,
        filtered.removed.len()
    );
    Ok(())
}
