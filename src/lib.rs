#![doc(test(attr(deny(warnings))))]

//! Finance Core keeps a personal ledger of income and expense transactions,
//! organised into budgeted categories, and answers the aggregate questions a
//! budgeting dashboard asks of it.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{FinanceStore, SeedPolicy, DEFAULT_SLOT};
pub use crate::errors::{FinanceError, FinanceResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}
