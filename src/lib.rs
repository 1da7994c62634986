#![doc(test(attr(deny(warnings))))]

//! Finance Tracker keeps a household ledger of income, fixed and variable
//! expenses, derives totals and chart series from it, lays entries out on a
//! month calendar, and ships a small text shell on top.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::services::{CalendarService, SummaryService};
pub use crate::core::LedgerStore;
pub use crate::domain::{Entry, EntryCategory, Ledger};
pub use crate::errors::{LedgerError, Result, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance tracker tracing initialized.");
    });
}
