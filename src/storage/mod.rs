// src/storage/mod.rs

//! Durable state: the downloaded artifact and the fingerprint ledger.

mod artifact;
mod ledger;

pub use artifact::ArtifactStore;
pub use ledger::FingerprintLedger;
