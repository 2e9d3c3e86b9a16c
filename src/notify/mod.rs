// src/notify/mod.rs

//! Outbound notifications for newly detected menus.

mod smtp;

use std::path::Path;

pub use smtp::SmtpNotifier;

use crate::error::Result;

/// Everything a notification needs to describe one new menu.
#[derive(Debug)]
pub struct MenuNotification<'a> {
    /// Section the menu belongs to
    pub section: &'a str,
    /// URL the PDF was downloaded from
    pub pdf_url: &'a str,
    /// On-disk path of the stored artifact; the attachment is named after it
    pub pdf_path: &'a Path,
    /// Raw PDF bytes to attach
    pub pdf_bytes: &'a [u8],
}

/// Sends a notification with the menu attached.
///
/// A failure propagates before the ledger is updated, so the same menu is
/// detected and re-sent on the next run.
pub trait Notifier {
    fn notify(&self, notification: &MenuNotification<'_>) -> Result<()>;
}
