//! Configuration management for bootprep.
//!
//! Reads configuration from .env file and environment variables.
//! Environment variables take precedence over .env file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Kernel command line written by the `boot` preset unless overridden.
pub const DEFAULT_BOOT_CMDLINE: &str = "console=serial0,115200 console=tty1 rootfstype=ext4 \
     fsck.repair=yes rootwait panic=60 root=PARTUUID=2ddb0742-05 init=/usr/bin/rugpi-ctrl";

/// Root filesystem being prepared by the image pipeline.
pub const ROOT_DIR_VAR: &str = "RUGPI_ROOT_DIR";
/// Kernel command line for the `boot` preset.
pub const BOOT_CMDLINE_VAR: &str = "BOOT_CMDLINE";
/// Directory where presets are written when no output is given.
pub const OUTPUT_DIR_VAR: &str = "BOOTPREP_OUTPUT_DIR";

/// Bootprep configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root filesystem whose etc/fstab is edited (unset outside the pipeline)
    pub root_dir: Option<PathBuf>,
    /// Kernel command line for the boot preset
    pub boot_cmdline: String,
    /// Directory for preset outputs (default: base directory)
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from .env file and environment.
    ///
    /// The .env file is looked up in `base_dir`; a missing or unreadable file
    /// is ignored.
    pub fn load(base_dir: &Path) -> Self {
        let mut env_vars = HashMap::new();

        if let Ok(iter) = dotenvy::from_path_iter(base_dir.join(".env")) {
            for (key, value) in iter.flatten() {
                env_vars.insert(key, value);
            }
        }

        // Environment variables override .env file
        for (key, value) in std::env::vars() {
            env_vars.insert(key, value);
        }

        Self::from_vars(base_dir, &env_vars)
    }

    /// Build configuration from already collected variables.
    pub fn from_vars(base_dir: &Path, env_vars: &HashMap<String, String>) -> Self {
        let resolve = |value: &String| {
            let path = PathBuf::from(value);
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        let root_dir = env_vars
            .get(ROOT_DIR_VAR)
            .filter(|value| !value.is_empty())
            .map(resolve);

        let boot_cmdline = env_vars
            .get(BOOT_CMDLINE_VAR)
            .cloned()
            .unwrap_or_else(|| DEFAULT_BOOT_CMDLINE.to_string());

        let output_dir = env_vars
            .get(OUTPUT_DIR_VAR)
            .filter(|value| !value.is_empty())
            .map(resolve)
            .unwrap_or_else(|| base_dir.to_path_buf());

        Self {
            root_dir,
            boot_cmdline,
            output_dir,
        }
    }

    /// The fstab of the configured root filesystem, if any.
    pub fn root_fstab(&self) -> Option<PathBuf> {
        self.root_dir
            .as_ref()
            .map(|root| root.join("etc").join("fstab"))
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        match &self.root_dir {
            Some(root) => println!("  {ROOT_DIR_VAR}: {}", root.display()),
            None => println!("  {ROOT_DIR_VAR}: (unset)"),
        }
        println!("  {BOOT_CMDLINE_VAR}: {}", self.boot_cmdline);
        println!("  {OUTPUT_DIR_VAR}: {}", self.output_dir.display());
        if let Some(fstab) = self.root_fstab() {
            if fstab.exists() {
                println!("  fstab: FOUND ({})", fstab.display());
            } else {
                println!("  fstab: NOT FOUND ({})", fstab.display());
            }
        }
    }
}
