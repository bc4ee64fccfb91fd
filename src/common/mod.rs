//! Shared utilities across bootprep modules.

pub mod files;

pub use files::write_file_atomic;
