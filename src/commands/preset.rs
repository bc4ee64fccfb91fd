//! Preset command - writes a built-in environment.

use anyhow::Result;
use std::path::PathBuf;

use bootprep::config::Config;
use bootprep::preset::Preset;

/// Execute the preset command.
///
/// `overrides` are applied on top of the preset in order. Without `output`
/// the preset's own file name inside the configured output directory is used.
pub fn cmd_preset(
    preset: Preset,
    output: Option<PathBuf>,
    overrides: Vec<(String, String)>,
    config: &Config,
) -> Result<()> {
    let mut env = preset.environment(config)?;
    for (key, value) in overrides {
        env.set(&key, value)?;
    }

    let output = output.unwrap_or_else(|| config.output_dir.join(preset.file_name()));
    env.save(&output)?;
    println!("Wrote preset {} to {}", preset.name(), output.display());
    Ok(())
}

/// Parse a `KEY=VALUE` argument.
pub fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("missing variable name in `{arg}`")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got `{arg}`")),
    }
}
