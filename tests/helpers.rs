//! Shared test utilities for bootprep tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test environment with a temporary working directory and mock rootfs.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Working directory the binary runs in
    pub base_dir: PathBuf,
    /// Mock root filesystem (holds etc/fstab)
    pub rootfs: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with temporary directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let rootfs = base_dir.join("rootfs");

        fs::create_dir_all(rootfs.join("etc")).expect("Failed to create rootfs dir");

        Self {
            _temp_dir: temp_dir,
            base_dir,
            rootfs,
        }
    }

    /// Write a file relative to the base directory and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.base_dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Run the bootprep binary inside the base directory.
    ///
    /// Variables from the caller's environment that bootprep reads are cleared
    /// so results don't depend on the host.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to run bootprep")
    }

    /// Build a bootprep command without running it.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_bootprep"));
        cmd.args(args)
            .current_dir(&self.base_dir)
            .env_remove("RUGPI_ROOT_DIR")
            .env_remove("BOOT_CMDLINE")
            .env_remove("BOOTPREP_OUTPUT_DIR");
        cmd
    }
}

/// The checksum header of an encoded environment as an integer.
pub fn header(blob: &[u8]) -> u32 {
    u32::from_le_bytes(blob[..4].try_into().expect("blob shorter than header"))
}

/// Build the expected blob for a payload.
pub fn blob_for(payload: &[u8]) -> Vec<u8> {
    let mut blob = crc32fast::hash(payload).to_le_bytes().to_vec();
    blob.extend_from_slice(payload);
    blob
}

/// Assert that an environment file has a valid checksum and the given payload.
pub fn assert_env_file(path: &Path, payload: &[u8]) {
    let blob = fs::read(path).unwrap_or_else(|_| panic!("Failed to read {}", path.display()));
    assert_eq!(
        header(&blob),
        crc32fast::hash(&blob[4..]),
        "Bad checksum in {}",
        path.display()
    );
    assert_eq!(
        &blob[4..],
        payload,
        "Unexpected payload in {}",
        path.display()
    );
}

/// Standard output of a finished command as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
