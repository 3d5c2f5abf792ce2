//! Domain entities shared by the ledger, services, and shell.

pub mod category;
pub mod common;
pub mod month;
pub mod transaction;

pub use category::{Category, CategoryId, CategoryUpdate, NewCategory, FALLBACK_CATEGORY_ID};
pub use common::{find_by_id, find_by_name, Displayable, Identifiable, NamedEntity};
pub use month::MonthKey;
pub use transaction::{
    NewTransaction, Transaction, TransactionFilter, TransactionId, TransactionUpdate,
};
