// src/models/mod.rs

//! Domain models for the menu checker application.

mod config;
mod ledger;

// Re-export all public types
pub use config::{CheckerConfig, Config, EmailConfig, MenuSection};
pub use ledger::LedgerState;
