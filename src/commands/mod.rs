//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `json2env` - Encode a JSON object as a bootloader environment
//! - `preset` - Write a built-in environment
//! - `fstab` - Strip root and boot mounts from a mount table
//! - `show` - Display information

mod fstab;
mod json2env;
mod preset;
pub mod show;

pub use fstab::cmd_fstab;
pub use json2env::cmd_json2env;
pub use preset::{cmd_preset, parse_assignment};
pub use show::cmd_show;
