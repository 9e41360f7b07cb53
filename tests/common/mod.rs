// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by the integration tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes `content` to `config.yml` in a fresh temporary directory.
///
/// The directory is returned so it outlives the test body.
#[allow(dead_code)]
pub fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, content).unwrap();
    (dir, path)
}
