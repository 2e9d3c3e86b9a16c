// src/storage/ledger.rs

//! Persistence for the fingerprint ledger.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::LedgerState;

/// Owns the ledger file; no other component touches it directly.
///
/// Single-writer: the deployment model assumes at most one invocation
/// runs at a time, so there is no file locking.
pub struct FingerprintLedger {
    path: PathBuf,
}

impl FingerprintLedger {
    /// Create a ledger backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted state. A missing file is not an error and
    /// yields the empty default state.
    pub fn load(&self) -> Result<LedgerState> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LedgerState::default()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Overwrite the persisted state (write to temp, then rename).
    pub fn save(&self, state: &LedgerState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(state)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.flush()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_default() {
        let tmp = TempDir::new().unwrap();
        let ledger = FingerprintLedger::new(tmp.path().join("state.json"));

        assert_eq!(ledger.load().unwrap(), LedgerState::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let ledger = FingerprintLedger::new(tmp.path().join("state.json"));

        let state = LedgerState {
            last_pdf_hash: Some("abcd".into()),
            last_pdf_url: Some("https://paiperlek.lu/menu.pdf".into()),
            last_check: Some(chrono::Local::now()),
            last_pdf_path: Some("menus/menu_20240101_120000.pdf".into()),
        };
        ledger.save(&state).unwrap();

        assert_eq!(ledger.load().unwrap(), state);
    }

    #[test]
    fn test_save_overwrites_previous_record() {
        let tmp = TempDir::new().unwrap();
        let ledger = FingerprintLedger::new(tmp.path().join("state.json"));

        let first = LedgerState {
            last_pdf_hash: Some("one".into()),
            ..LedgerState::default()
        };
        let second = LedgerState {
            last_pdf_hash: Some("two".into()),
            ..LedgerState::default()
        };
        ledger.save(&first).unwrap();
        ledger.save(&second).unwrap();

        assert_eq!(ledger.load().unwrap().last_pdf_hash.as_deref(), Some("two"));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        let ledger = FingerprintLedger::new(&path);

        ledger.save(&LedgerState::default()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
