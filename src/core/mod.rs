//! Store facade, services, and filesystem helpers.

pub mod finance_store;
pub mod services;
pub mod utils;

pub use finance_store::{FinanceStore, LoadReport, LoadSource, SeedPolicy, DEFAULT_SLOT};
