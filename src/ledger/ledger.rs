use serde::{Deserialize, Serialize};

use crate::domain::{
    common::find_by_id, Category, CategoryId, Transaction, TransactionId,
};

use super::seed;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Snapshot of every transaction and category; the unit persisted to a slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::empty()
    }
}

impl Ledger {
    pub fn empty() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Default categories plus the demo transactions.
    pub fn seeded() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: seed::sample_transactions(),
            categories: seed::default_categories(),
        }
    }

    /// Default categories without any transactions.
    pub fn with_default_categories() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            categories: seed::default_categories(),
        }
    }

    pub fn add_category(&mut self, category: Category) -> CategoryId {
        let id = category.id.clone();
        self.categories.push(category);
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> TransactionId {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    pub fn category_mut(&mut self, id: &CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| &category.id == id)
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        find_by_id(&self.transactions, &id)
    }

    pub fn transaction_mut(&mut self, id: TransactionId) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn remove_category(&mut self, id: &CategoryId) -> Option<Category> {
        let index = self.categories.iter().position(|cat| &cat.id == id)?;
        Some(self.categories.remove(index))
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn has_category(&self, id: &CategoryId) -> bool {
        self.category(id).is_some()
    }

    /// Re-inserts the default fallback category when a loaded snapshot lacks it.
    /// Returns `true` when the ledger was changed.
    pub fn ensure_fallback_category(&mut self) -> bool {
        if self.has_category(&CategoryId::fallback()) {
            return false;
        }
        self.categories.push(seed::fallback_category());
        true
    }

    /// Transactions whose category id no longer resolves.
    pub fn orphaned_transactions(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| !self.has_category(&txn.category_id))
            .collect()
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn seeded_ledger_has_defaults_and_samples() {
        let ledger = Ledger::seeded();
        assert_eq!(ledger.category_count(), 6);
        assert_eq!(ledger.transaction_count(), 6);
        assert!(ledger.has_category(&CategoryId::fallback()));
        assert!(ledger.orphaned_transactions().is_empty());
    }

    #[test]
    fn ensure_fallback_restores_missing_other_category() {
        let mut ledger = Ledger::seeded();
        ledger.remove_category(&CategoryId::fallback());
        assert!(ledger.ensure_fallback_category());
        assert!(ledger.has_category(&CategoryId::fallback()));
        assert!(!ledger.ensure_fallback_category());
    }

    #[test]
    fn orphans_are_detected() {
        let mut ledger = Ledger::with_default_categories();
        let date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        ledger.add_transaction(Transaction::new(-5.0, date, "Ghost", "missing".into()));
        assert_eq!(ledger.orphaned_transactions().len(), 1);
    }

    #[test]
    fn missing_schema_version_defaults_to_current() {
        let ledger: Ledger = serde_json::from_str(r#"{"transactions":[],"categories":[]}"#).unwrap();
        assert_eq!(ledger.schema_version, CURRENT_SCHEMA_VERSION);
    }
}
