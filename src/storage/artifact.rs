// src/storage/artifact.rs

//! Single-slot rotating store for the downloaded menu PDF.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

const PREFIX: &str = "menu_";
const EXTENSION: &str = ".pdf";

/// Holds at most one current menu artifact.
///
/// Every prior artifact matching the naming pattern is deleted before the
/// new one is written.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist the given bytes as the current artifact.
    ///
    /// Creates the directory if absent, purges all previous artifacts,
    /// then writes `menu_<YYYYMMDD_HHMMSS>.pdf`. After this returns,
    /// exactly one matching file exists and holds exactly `bytes`.
    pub fn store(&self, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        self.purge()?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self.dir.join(format!("{PREFIX}{timestamp}{EXTENSION}"));
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Path of the current artifact, if one exists.
    pub fn current(&self) -> Result<Option<PathBuf>> {
        Ok(self.matching_files()?.into_iter().next())
    }

    /// Delete every stored artifact matching the naming pattern.
    fn purge(&self) -> Result<()> {
        for path in self.matching_files()? {
            fs::remove_file(&path)?;
            log::debug!("Deleted old artifact: {}", path.display());
        }
        Ok(())
    }

    fn matching_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        if !self.dir.exists() {
            return Ok(files);
        }
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if matches_pattern(&entry.path()) {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Whether a path matches the `menu_*.pdf` naming pattern.
fn matches_pattern(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with(PREFIX) && name.ends_with(EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_store_writes_exact_bytes() {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path());

        let path = store.store(b"%PDF-1.4 week 12").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4 week 12");
    }

    #[test]
    fn test_filename_follows_pattern() {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path());

        let path = store.store(b"x").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("menu_"));
        assert!(name.ends_with(".pdf"));
        // menu_ + YYYYMMDD_HHMMSS + .pdf
        assert_eq!(name.len(), "menu_".len() + 15 + ".pdf".len());
    }

    #[test]
    fn test_store_purges_previous_artifacts() {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path());

        // Simulate artifacts from earlier runs
        fs::write(tmp.path().join("menu_20240101_000000.pdf"), b"old1").unwrap();
        fs::write(tmp.path().join("menu_20240108_000000.pdf"), b"old2").unwrap();

        let path = store.store(b"new").unwrap();

        let remaining: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| matches_pattern(p))
            .collect();
        assert_eq!(remaining, vec![path]);
    }

    #[test]
    fn test_store_leaves_unrelated_files_alone() {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path());

        fs::write(tmp.path().join("notes.txt"), b"keep").unwrap();
        fs::write(tmp.path().join("other.pdf"), b"keep").unwrap();

        store.store(b"new").unwrap();

        assert!(tmp.path().join("notes.txt").exists());
        assert!(tmp.path().join("other.pdf").exists());
    }

    #[test]
    fn test_store_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested/menus");
        let store = ArtifactStore::new(&dir);

        let path = store.store(b"x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_current_reflects_store_state() {
        let tmp = TempDir::new().unwrap();
        let store = ArtifactStore::new(tmp.path());

        assert!(store.current().unwrap().is_none());
        let path = store.store(b"x").unwrap();
        assert_eq!(store.current().unwrap(), Some(path));
    }
}
