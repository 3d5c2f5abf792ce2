//! The persisted ledger snapshot and its seed data.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod seed;

pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
