use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Write an XML fixture into the temp dir and return its path
#[allow(dead_code)]
pub fn write_fixture(dir: &TempDir, name: &str, xml: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, xml).unwrap();
    path
}

/// Read a fixture back as a string
#[allow(dead_code)]
pub fn read_back(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}
