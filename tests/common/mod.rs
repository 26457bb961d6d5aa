#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use inventory_meta::diff;
use tempfile::{TempDir, tempdir};

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Panics with a line-by-line report when the texts differ.
pub fn assert_text_eq(found: &str, expected: &str) {
    if found != expected {
        panic!("output mismatch:\n{}", diff(found, expected));
    }
}

/// Scratch directory that is removed on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` to `name` (which may contain directories) and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create temp dirs");
        }
        fs::write(&path, contents).expect("write temp file contents");
        path
    }
}
