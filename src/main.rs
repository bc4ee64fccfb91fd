//! Bootprep - boot preparation utilities for image builds.
//!
//! - Encodes JSON objects as U-Boot environment files
//! - Writes the built-in boot environments
//! - Strips root and boot mounts from the image's fstab

mod commands;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use bootprep::config::Config;
use bootprep::preset::Preset;

#[derive(Parser)]
#[command(name = "bootprep", version)]
#[command(about = "Boot preparation utilities for image builds")]
#[command(
    after_help = "EXAMPLES:\n  bootprep json2env env.json boot.env   Encode a JSON object\n  bootprep preset boot                  Write boot.env\n  bootprep fstab rootfs/etc/fstab       Strip root and boot mounts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a flat JSON object of strings as an environment file
    Json2env {
        /// JSON file to read
        json: PathBuf,
        /// Environment file to write (overwritten)
        env: PathBuf,
    },

    /// Write a built-in environment
    Preset {
        #[arg(value_enum)]
        preset: Preset,
        /// Output file (default: the preset's file name in BOOTPREP_OUTPUT_DIR)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Add or override a variable (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = commands::parse_assignment)]
        overrides: Vec<(String, String)>,
    },

    /// Remove /, /boot and /boot/firmware entries from an fstab
    Fstab {
        /// Fstab to rewrite (default: $RUGPI_ROOT_DIR/etc/fstab)
        path: Option<PathBuf>,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// Show built-in presets
    Presets,
}

/// Parse the command line, reporting misuse on stdout with exit status 1.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            print!("{}", err.render());
            std::process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    let cli = parse_cli();
    let base_dir = std::env::current_dir()?;
    let config = Config::load(&base_dir);

    match cli.command {
        Commands::Json2env { json, env } => {
            commands::cmd_json2env(&json, &env)?;
        }

        Commands::Preset {
            preset,
            output,
            overrides,
        } => {
            commands::cmd_preset(preset, output, overrides, &config)?;
        }

        Commands::Fstab { path } => {
            commands::cmd_fstab(path, &config)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Presets => commands::show::ShowTarget::Presets,
            };
            commands::cmd_show(show_target, &config)?;
        }
    }

    Ok(())
}
