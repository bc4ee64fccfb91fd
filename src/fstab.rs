//! Mount table filtering.
//!
//! The image's root and boot partitions are mounted by the init system of the
//! A/B update scheme, so their entries are dropped from `/etc/fstab`.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::write_file_atomic;

/// Mount points whose entries are removed.
pub const STRIPPED_MOUNT_POINTS: [&str; 3] = ["/", "/boot", "/boot/firmware"];

/// Outcome of filtering a mount table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterReport {
    /// The rewritten table
    pub text: String,
    /// Number of lines kept
    pub kept: usize,
    /// Lines that were dropped, in order
    pub removed: Vec<String>,
}

/// Whether a line mounts one of [`STRIPPED_MOUNT_POINTS`].
///
/// Lines with fewer than two fields never match.
pub fn is_stripped(line: &str) -> bool {
    line.split_whitespace()
        .nth(1)
        .is_some_and(|mount_point| STRIPPED_MOUNT_POINTS.contains(&mount_point))
}

/// Drop root and boot mounts from a mount table.
pub fn filter(text: &str) -> FilterReport {
    let mut filtered = FilterReport::default();
    let mut kept = Vec::new();

    for line in text.lines() {
        if is_stripped(line) {
            filtered.removed.push(line.to_string());
        } else {
            kept.push(line);
        }
    }

    filtered.kept = kept.len();
    filtered.text = kept.join("\n");
    if text.ends_with('\n') && !kept.is_empty() {
        filtered.text.push('\n');
    }
    filtered
}

/// Filter a mount table file in place.
pub fn filter_file(path: &Path) -> Result<FilterReport> {
    let original =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let filtered = filter(&original);
    write_file_atomic(path, &filtered.text)
        .with_context(|| format!("Failed to rewrite {}", path.display()))?;
    Ok(filtered)
}
