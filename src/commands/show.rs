//! Show command - displays information.

use anyhow::Result;

use bootprep::config::Config;
use bootprep::preset::Preset;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// Show built-in presets and their entries
    Presets,
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => {
            config.print();
        }
        ShowTarget::Presets => {
            for preset in Preset::ALL {
                let env = preset.environment(config)?;
                println!("{} ({}):", preset.name(), preset.file_name());
                for (key, value) in env.iter() {
                    println!("  {key}={value}");
                }
            }
        }
    }
    Ok(())
}
