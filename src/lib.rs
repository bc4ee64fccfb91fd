//! Bootprep library exports.
//!
//! The command-line handlers live in the binary; everything they build on is
//! exposed here for integration testing.

pub mod common;
pub mod config;
pub mod fstab;
pub mod json;
pub mod preset;
pub mod uboot;

pub use uboot::{encode, EnvError, Environment};
