// src/pipeline/mod.rs

//! Check pipeline: fetch → resolve → download → fingerprint → compare
//! → notify/persist.

mod check;
mod fingerprint;
mod resolve;

pub use check::{CheckOutcome, CheckPipeline};
pub use fingerprint::fingerprint;
pub use resolve::{CandidateLink, SectionLinkResolver};
