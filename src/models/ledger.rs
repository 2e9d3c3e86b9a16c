//! Persisted ledger record.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The durable record of the last-seen menu.
///
/// `last_pdf_hash`, when present, equals the fingerprint of the artifact at
/// `last_pdf_path` as of the last run that detected or confirmed the menu.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LedgerState {
    /// Hex-encoded SHA-256 of the last-seen PDF
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pdf_hash: Option<String>,

    /// URL the last-seen PDF was downloaded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pdf_url: Option<String>,

    /// Time of the last completed check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_check: Option<DateTime<Local>>,

    /// Filesystem path of the stored artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pdf_path: Option<String>,
}

impl LedgerState {
    /// Whether a previous menu has ever been recorded.
    pub fn has_previous(&self) -> bool {
        self.last_pdf_hash.is_some()
    }

    /// Whether the given fingerprint matches the recorded one.
    ///
    /// An absent previous hash never matches, so a first run always
    /// counts as changed.
    pub fn matches(&self, fingerprint: &str) -> bool {
        self.last_pdf_hash.as_deref() == Some(fingerprint)
    }
}
