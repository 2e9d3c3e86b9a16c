// src/pipeline/check.rs

//! Single-pass check pipeline.
//!
//! Strictly linear per invocation; no retries, no parallelism. Assumes at
//! most one invocation runs at a time: neither the ledger file nor the
//! artifact directory is locked.

use std::path::PathBuf;

use chrono::Local;

use crate::error::Result;
use crate::models::Config;
use crate::notify::{MenuNotification, Notifier};
use crate::pipeline::{SectionLinkResolver, fingerprint};
use crate::storage::{ArtifactStore, FingerprintLedger};
use crate::utils::http::PageFetcher;

/// Terminal outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// No PDF matched the section; the ledger is left untouched.
    NoMenuFound,
    /// The menu is identical to the last-seen one; only the check
    /// timestamp was updated.
    Unchanged { url: String },
    /// A new menu was detected, emailed, and recorded.
    Changed { url: String, path: PathBuf },
}

/// Orchestrates one check run over its collaborators.
pub struct CheckPipeline<'a> {
    config: &'a Config,
    fetcher: &'a dyn PageFetcher,
    store: &'a ArtifactStore,
    ledger: &'a FingerprintLedger,
    notifier: &'a dyn Notifier,
}

impl<'a> CheckPipeline<'a> {
    /// Create a pipeline over the given collaborators.
    pub fn new(
        config: &'a Config,
        fetcher: &'a dyn PageFetcher,
        store: &'a ArtifactStore,
        ledger: &'a FingerprintLedger,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            config,
            fetcher,
            store,
            ledger,
            notifier,
        }
    }

    /// Run the check once.
    ///
    /// Fatal errors (transport, persistence, notification) propagate to
    /// the caller; a notification failure aborts before the ledger is
    /// updated, so the same menu is retried on the next run.
    pub fn run(&self) -> Result<CheckOutcome> {
        let checker = &self.config.checker;
        let section = &self.config.section;

        log::info!("Checking menu at {}", checker.page_url);
        log::info!("Looking for section: {}", section.name);

        let markup = self.fetcher.fetch_text(&checker.page_url)?;

        let resolver = SectionLinkResolver::new(section, &checker.base_url)?;
        let Some(pdf_url) = resolver.resolve(&markup) else {
            log::info!("Could not find PDF for the specified section");
            return Ok(CheckOutcome::NoMenuFound);
        };
        log::info!("Found PDF: {}", pdf_url);

        let bytes = self.fetcher.fetch_bytes(&pdf_url)?;
        let path = self.store.store(&bytes)?;
        let hash = fingerprint(&bytes);

        let mut state = self.ledger.load()?;
        if state.matches(&hash) {
            log::info!("No new menu (same as previous)");
            state.last_check = Some(Local::now());
            self.ledger.save(&state)?;
            return Ok(CheckOutcome::Unchanged { url: pdf_url });
        }

        log::info!("New menu detected!");
        self.notifier.notify(&MenuNotification {
            section: &section.name,
            pdf_url: &pdf_url,
            pdf_path: &path,
            pdf_bytes: &bytes,
        })?;

        state.last_pdf_hash = Some(hash);
        state.last_pdf_url = Some(pdf_url.clone());
        state.last_pdf_path = Some(path.display().to_string());
        state.last_check = Some(Local::now());
        self.ledger.save(&state)?;
        log::info!("State updated");

        Ok(CheckOutcome::Changed { url: pdf_url, path })
    }
}
