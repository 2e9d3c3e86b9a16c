// src/lib.rs

//! menucheck library
//!
//! Checks the Paiper Lek cafeteria page for a newly published menu PDF
//! for one configured section, and emails it when the content changes.

pub mod error;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod storage;
pub mod utils;
