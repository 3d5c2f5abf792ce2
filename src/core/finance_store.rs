//! The process-wide finance store: owns the ledger, answers queries, and
//! writes the whole snapshot to its storage slot after every mutation.

use crate::core::services::{BudgetService, CategoryService, TransactionService};
use crate::domain::{
    Category, CategoryId, CategoryUpdate, MonthKey, NewCategory, NewTransaction, Transaction,
    TransactionId, TransactionUpdate,
};
use crate::errors::{FinanceError, FinanceResult};
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use crate::storage::StorageBackend;

pub const DEFAULT_SLOT: &str = "finance-store";

/// What an empty or unreadable slot is replaced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Default categories plus the demo transactions.
    #[default]
    Sample,
    /// Default categories only.
    CategoriesOnly,
}

impl SeedPolicy {
    fn ledger(self) -> Ledger {
        match self {
            SeedPolicy::Sample => Ledger::seeded(),
            SeedPolicy::CategoriesOnly => Ledger::with_default_categories(),
        }
    }
}

/// Where the state of the last load came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Seeded { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: LoadSource,
    pub warnings: Vec<String>,
}

impl LoadReport {
    pub fn was_seeded(&self) -> bool {
        matches!(self.source, LoadSource::Seeded { .. })
    }
}

pub struct FinanceStore {
    ledger: Ledger,
    slot: String,
    seed: SeedPolicy,
    storage: Box<dyn StorageBackend>,
    load_report: LoadReport,
}

impl FinanceStore {
    /// Opens `slot`, seeding with sample data when it is empty or unreadable.
    pub fn open(storage: Box<dyn StorageBackend>, slot: &str) -> FinanceResult<Self> {
        Self::open_with(storage, slot, SeedPolicy::default())
    }

    pub fn open_with(
        storage: Box<dyn StorageBackend>,
        slot: &str,
        seed: SeedPolicy,
    ) -> FinanceResult<Self> {
        let (ledger, load_report) = load_slot(storage.as_ref(), slot, seed)?;
        Ok(Self {
            ledger,
            slot: slot.to_string(),
            seed,
            storage,
            load_report,
        })
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn snapshot(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.ledger.categories
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.ledger.transaction(id)
    }

    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.ledger.category(id)
    }

    pub fn add_transaction(&mut self, data: NewTransaction) -> FinanceResult<TransactionId> {
        let id = TransactionService::add(&mut self.ledger, data);
        self.save()?;
        Ok(id)
    }

    /// Returns `false` when no transaction has this id.
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> FinanceResult<bool> {
        let changed = TransactionService::update(&mut self.ledger, id, update);
        self.save()?;
        Ok(changed)
    }

    pub fn delete_transaction(&mut self, id: TransactionId) -> FinanceResult<bool> {
        let removed = TransactionService::remove(&mut self.ledger, id).is_some();
        self.save()?;
        Ok(removed)
    }

    pub fn add_category(&mut self, data: NewCategory) -> FinanceResult<CategoryId> {
        let id = CategoryService::add(&mut self.ledger, data);
        self.save()?;
        Ok(id)
    }

    pub fn update_category(&mut self, id: &CategoryId, update: CategoryUpdate) -> FinanceResult<bool> {
        let changed = CategoryService::update(&mut self.ledger, id, update);
        self.save()?;
        Ok(changed)
    }

    /// Moves the category's transactions to the fallback category and removes
    /// it. Deleting the fallback is a no-op; refusing to delete the last
    /// category is left to the caller (see [`CategoryService::ensure_removable`]).
    pub fn delete_category(&mut self, id: &CategoryId) -> FinanceResult<bool> {
        let removed = CategoryService::remove(&mut self.ledger, id);
        self.save()?;
        Ok(removed)
    }

    pub fn transactions_by_month(&self, month: MonthKey) -> Vec<&Transaction> {
        TransactionService::by_month(&self.ledger, month)
    }

    pub fn transactions_by_category(&self, category_id: &CategoryId) -> Vec<&Transaction> {
        TransactionService::by_category(&self.ledger, category_id)
    }

    pub fn total_expenses_by_category(&self, category_id: &CategoryId, month: Option<MonthKey>) -> f64 {
        BudgetService::total_expenses_by_category(&self.ledger, category_id, month)
    }

    pub fn total_expenses(&self, month: Option<MonthKey>) -> f64 {
        BudgetService::total_expenses(&self.ledger, month)
    }

    pub fn total_income(&self, month: Option<MonthKey>) -> f64 {
        BudgetService::total_income(&self.ledger, month)
    }

    pub fn budget_progress(&self, category_id: &CategoryId, month: Option<MonthKey>) -> f64 {
        BudgetService::budget_progress(&self.ledger, category_id, month)
    }

    pub fn monthly_budget_total(&self) -> f64 {
        BudgetService::monthly_budget_total(&self.ledger)
    }

    /// Writes the current snapshot to the slot. The in-memory state is kept
    /// even when the write fails.
    pub fn save(&self) -> FinanceResult<()> {
        let json = serde_json::to_string_pretty(&self.ledger)?;
        self.storage
            .write_slot(&self.slot, &json)
            .inspect_err(|err| {
                tracing::warn!(slot = %self.slot, error = %err, "failed to persist finance store");
            })
    }

    /// Replaces the in-memory state with whatever the slot currently holds.
    pub fn reload(&mut self) -> FinanceResult<&LoadReport> {
        let (ledger, report) = load_slot(self.storage.as_ref(), &self.slot, self.seed)?;
        self.ledger = ledger;
        self.load_report = report;
        Ok(&self.load_report)
    }

    /// Discards all state, reseeds, and persists the seed.
    pub fn reset(&mut self) -> FinanceResult<()> {
        self.storage.clear_slot(&self.slot)?;
        self.ledger = self.seed.ledger();
        self.load_report = LoadReport {
            source: LoadSource::Seeded {
                reason: "store reset".into(),
            },
            warnings: Vec::new(),
        };
        tracing::info!(slot = %self.slot, "finance store reset to seed data");
        self.save()
    }
}

fn load_slot(
    storage: &dyn StorageBackend,
    slot: &str,
    seed: SeedPolicy,
) -> FinanceResult<(Ledger, LoadReport)> {
    let seeded = |reason: String| {
        tracing::info!(slot, %reason, "seeding finance store");
        (
            seed.ledger(),
            LoadReport {
                source: LoadSource::Seeded { reason },
                warnings: Vec::new(),
            },
        )
    };

    let Some(raw) = storage.read_slot(slot)? else {
        return Ok(seeded("no persisted state".into()));
    };
    let mut ledger: Ledger = match serde_json::from_str(&raw) {
        Ok(ledger) => ledger,
        Err(err) => {
            tracing::warn!(slot, error = %err, "persisted state is unreadable");
            return Ok(seeded(format!("persisted state is unreadable: {err}")));
        }
    };
    if ledger.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(FinanceError::Storage(format!(
            "slot `{}` uses schema v{}, newer than supported v{}",
            slot, ledger.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }

    let mut warnings = Vec::new();
    if ledger.ensure_fallback_category() {
        warnings.push("fallback category was missing and has been restored".to_string());
    }
    for txn in ledger.orphaned_transactions() {
        warnings.push(format!(
            "transaction {} references missing category {}",
            txn.id, txn.category_id
        ));
    }
    for warning in &warnings {
        tracing::warn!(slot, "{warning}");
    }
    tracing::info!(
        slot,
        transactions = ledger.transaction_count(),
        categories = ledger.category_count(),
        "loaded finance store"
    );
    Ok((
        ledger,
        LoadReport {
            source: LoadSource::Persisted,
            warnings,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn open_memory() -> (FinanceStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = FinanceStore::open(Box::new(storage.clone()), DEFAULT_SLOT).unwrap();
        (store, storage)
    }

    #[test]
    fn empty_slot_is_seeded() {
        let (store, storage) = open_memory();
        assert!(store.load_report().was_seeded());
        assert_eq!(store.categories().len(), 6);
        assert_eq!(store.transactions().len(), 6);
        assert!(storage.read_slot(DEFAULT_SLOT).unwrap().is_none());
    }

    #[test]
    fn every_mutation_persists() {
        let (mut store, storage) = open_memory();
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let id = store
            .add_transaction(NewTransaction::new(-8.0, date, "Lunch", "food".into()))
            .unwrap();
        let persisted: Ledger =
            serde_json::from_str(&storage.read_slot(DEFAULT_SLOT).unwrap().unwrap()).unwrap();
        assert!(persisted.transaction(id).is_some());

        store.delete_transaction(id).unwrap();
        let persisted: Ledger =
            serde_json::from_str(&storage.read_slot(DEFAULT_SLOT).unwrap().unwrap()).unwrap();
        assert!(persisted.transaction(id).is_none());
    }

    #[test]
    fn unreadable_slot_falls_back_to_seed() {
        let storage = MemoryStorage::with_slot(DEFAULT_SLOT, "{not json");
        let store = FinanceStore::open(Box::new(storage), DEFAULT_SLOT).unwrap();
        match &store.load_report().source {
            LoadSource::Seeded { reason } => assert!(reason.contains("unreadable")),
            other => panic!("expected seeded store, got {other:?}"),
        }
        assert_eq!(store.monthly_budget_total(), 2750.0);
    }

    #[test]
    fn rejects_future_schema_versions() {
        let mut ledger = Ledger::seeded();
        ledger.schema_version = CURRENT_SCHEMA_VERSION + 1;
        let storage =
            MemoryStorage::with_slot(DEFAULT_SLOT, serde_json::to_string(&ledger).unwrap());
        let err = FinanceStore::open(Box::new(storage), DEFAULT_SLOT)
            .err()
            .expect("future schema must be rejected");
        assert!(err.to_string().contains("newer"), "unexpected error: {err}");
    }

    #[test]
    fn categories_only_seed_has_no_transactions() {
        let store = FinanceStore::open_with(
            Box::new(MemoryStorage::new()),
            DEFAULT_SLOT,
            SeedPolicy::CategoriesOnly,
        )
        .unwrap();
        assert!(store.transactions().is_empty());
        assert_eq!(store.categories().len(), 6);
    }

    #[test]
    fn reset_restores_seed_and_persists() {
        let (mut store, storage) = open_memory();
        store.delete_category(&"food".into()).unwrap();
        store.reset().unwrap();
        assert!(store.category(&"food".into()).is_some());
        let persisted: Ledger =
            serde_json::from_str(&storage.read_slot(DEFAULT_SLOT).unwrap().unwrap()).unwrap();
        assert_eq!(persisted.category_count(), 6);
    }
}
