//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The tree is removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Name of the root directory as the scanner displays it.
    pub fn root_name(&self) -> String {
        crate::tree::entry_name(self.dir.path())
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory, creating parents as needed.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Add a file nested under enough directories that its absolute path is
    /// exactly `length` characters long.
    ///
    /// Panics if the temp dir itself is already longer than `length` allows.
    pub fn add_file_with_length(&self, length: usize) -> PathBuf {
        let base = std::path::absolute(self.dir.path()).expect("Failed to resolve temp dir");
        let base_len = base.to_string_lossy().chars().count();
        // Separator plus at least one character of file name
        assert!(length > base_len + 1, "temp dir path too long for {length}");

        let mut remaining = length - base_len;
        let mut rel = PathBuf::new();
        // Directory segments of at most 100 chars keep every name under NAME_MAX
        while remaining > 102 {
            rel.push("d".repeat(99));
            remaining -= 100;
        }
        rel.push("f".repeat(remaining - 1));
        let rel = rel.to_string_lossy().to_string();
        self.add_file(&rel, "")
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
