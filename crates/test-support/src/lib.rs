#![deny(unsafe_code)]

//! Shared test utilities for the appendlog workspace.
//!
//! [`TestDir`] wraps a [`tempfile::TempDir`] with the handful of file helpers
//! writer and CLI tests keep reaching for.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory removed when dropped.
#[derive(Debug)]
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Creates a fresh directory under the system temp location.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("appendlog-").tempdir()?;
        Ok(Self { dir })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the path of `name` inside the directory.
    #[must_use]
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Reads `name` in full.
    pub fn read_file(&self, name: impl AsRef<Path>) -> io::Result<Vec<u8>> {
        fs::read(self.join(name))
    }

    /// Writes `contents` to `name`, replacing anything already there.
    pub fn write_file(&self, name: impl AsRef<Path>, contents: &[u8]) -> io::Result<()> {
        fs::write(self.join(name), contents)
    }

    /// Reports whether `name` exists.
    #[must_use]
    pub fn exists(&self, name: impl AsRef<Path>) -> bool {
        self.join(name).exists()
    }
}
