//! Scratch directories for cantrip-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree that is removed on drop.
pub struct TestDir(TempDir);

impl TestDir {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Returns the directory's path.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` and any missing parents.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a stand-in audio file at `rel`.
    pub fn touch(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        fs::write(&path, b"").unwrap();
        path
    }

    /// Writes `content` to the `.cantrip.toml` inside `rel`, creating the directory.
    pub fn write_config(&self, rel: &str, content: &str) -> PathBuf {
        let config = self.mkdir(rel).join(CONFIG_FILENAME);
        fs::write(&config, content).unwrap();
        config
    }
}
