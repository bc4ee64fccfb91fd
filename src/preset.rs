//! Built-in environments written into the boot partition.
//!
//! `boot` carries the kernel command line. The remaining presets toggle the
//! A/B boot logic of the bootloader script: `boot_spare` selects the spare
//! system for the next boot and `bootpart` names the default boot partition.
//! A freshly prepared boot partition boots the default system, so
//! `boot_spare.env` starts out disabled.

use clap::ValueEnum;

use crate::config::Config;
use crate::uboot::{EnvError, Environment};

/// A named, built-in environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Kernel command line (boot.env)
    Boot,
    /// Initial spare boot state, switched off (boot_spare.env)
    BootSpare,
    /// Spare boot switched on (boot_spare.enabled.env)
    BootSpareEnabled,
    /// Spare boot switched off (boot_spare.disabled.env)
    BootSpareDisabled,
    /// Default boot partition (bootpart.default.env)
    BootpartDefault,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Boot,
        Preset::BootSpare,
        Preset::BootSpareEnabled,
        Preset::BootSpareDisabled,
        Preset::BootpartDefault,
    ];

    /// File name the bootloader script expects for this preset.
    pub fn file_name(self) -> &'static str {
        match self {
            Preset::Boot => "boot.env",
            Preset::BootSpare => "boot_spare.env",
            Preset::BootSpareEnabled => "boot_spare.enabled.env",
            Preset::BootSpareDisabled => "boot_spare.disabled.env",
            Preset::BootpartDefault => "bootpart.default.env",
        }
    }

    /// Name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Boot => "boot",
            Preset::BootSpare => "boot-spare",
            Preset::BootSpareEnabled => "boot-spare-enabled",
            Preset::BootSpareDisabled => "boot-spare-disabled",
            Preset::BootpartDefault => "bootpart-default",
        }
    }

    /// Build the environment for this preset.
    ///
    /// Only `boot` depends on the configuration, and it fails if the
    /// configured command line cannot be stored.
    pub fn environment(self, config: &Config) -> Result<Environment, EnvError> {
        match self {
            Preset::Boot => Environment::from_pairs([("cmdline", config.boot_cmdline.as_str())]),
            Preset::BootSpareEnabled => Environment::from_pairs([("boot_spare", "1")]),
            Preset::BootSpare | Preset::BootSpareDisabled => {
                Environment::from_pairs([("boot_spare", "0")])
            }
            Preset::BootpartDefault => Environment::from_pairs([("bootpart", "2")]),
        }
    }
}
