// src/pipeline/fingerprint.rs

//! Content fingerprinting for change detection.

use sha2::{Digest, Sha256};

/// Compute the hex-encoded SHA-256 fingerprint of the given bytes.
///
/// Used purely for equality comparison against the ledger, never for
/// addressing.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}
