mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{date, json_storage, open_store, open_store_with, temp_base};
use finance_core::core::LoadSource;
use finance_core::domain::{CategoryId, NewCategory, NewTransaction};
use finance_core::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use finance_core::storage::StorageBackend;
use finance_core::{FinanceStore, SeedPolicy, DEFAULT_SLOT};

fn slot_file(base: &PathBuf) -> PathBuf {
    json_storage(base).slot_path(DEFAULT_SLOT)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension("json.tmp");
    tmp
}

#[test]
fn persisting_then_reloading_yields_equal_snapshot() {
    let base = temp_base();
    let mut store = open_store(&base);
    let pets = store
        .add_category(NewCategory::new("Pets", "#a855f7", 80.0))
        .unwrap();
    store
        .add_transaction(NewTransaction::new(-25.0, date(2024, 2, 14), "Vet visit", pets))
        .unwrap();
    store
        .add_transaction(NewTransaction::new(
            3100.0,
            date(2024, 2, 28),
            "Salary",
            CategoryId::fallback(),
        ))
        .unwrap();
    for (day, amount) in [(3, -1.0 / 3.0), (9, 0.1 + 0.2), (21, -0.9720607333333335)] {
        store
            .add_transaction(NewTransaction::new(
                amount,
                date(2024, 3, day),
                "Split bill",
                CategoryId::fallback(),
            ))
            .unwrap();
    }
    for step in 1..=200 {
        store
            .add_transaction(NewTransaction::new(
                -(step as f64) * 29.16182 / 30.0,
                date(2024, 4, 1 + step % 28),
                "Daily share",
                CategoryId::fallback(),
            ))
            .unwrap();
    }
    let expected = store.snapshot().clone();
    drop(store);

    let reopened = open_store(&base);
    assert_eq!(reopened.load_report().source, LoadSource::Persisted);
    assert_eq!(reopened.snapshot(), &expected);
    for (before, after) in expected
        .transactions
        .iter()
        .zip(reopened.snapshot().transactions.iter())
    {
        assert_eq!(before.amount.to_bits(), after.amount.to_bits());
    }
}

#[test]
fn missing_slot_seeds_without_writing() {
    let base = temp_base();
    let store = open_store(&base);
    assert!(store.load_report().was_seeded());
    assert!(!slot_file(&base).exists());
}

#[test]
fn unreadable_slot_falls_back_to_seed() {
    let base = temp_base();
    let path = slot_file(&base);
    fs::write(&path, "{\"transactions\": [oops").unwrap();

    let store = open_store(&base);
    assert!(store.load_report().was_seeded());
    let seed = Ledger::seeded();
    assert_eq!(store.categories(), seed.categories.as_slice());
    assert_eq!(store.transactions().len(), seed.transactions.len());
}

#[test]
fn snapshot_uses_snake_case_fields() {
    let base = temp_base();
    let store = open_store(&base);
    store.save().unwrap();

    let json = fs::read_to_string(slot_file(&base)).unwrap();
    assert!(json.contains("\"schema_version\""));
    assert!(json.contains("\"budget_amount\": 1200.0"));
    assert!(json.contains("\"category_id\": \"housing\""));
    assert!(json.contains("\"date\": \"2023-12-05\""));
}

#[test]
fn snapshot_without_schema_version_loads() {
    let base = temp_base();
    let mut ledger = serde_json::to_value(Ledger::seeded()).unwrap();
    ledger.as_object_mut().unwrap().remove("schema_version");
    fs::write(slot_file(&base), ledger.to_string()).unwrap();

    let store = open_store(&base);
    assert_eq!(store.load_report().source, LoadSource::Persisted);
    assert_eq!(store.snapshot().schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(store.transactions().len(), 6);
}

#[test]
fn missing_fallback_category_is_restored_on_load() {
    let base = temp_base();
    let mut ledger = Ledger::seeded();
    ledger.categories.retain(|category| !category.id.is_fallback());
    fs::write(slot_file(&base), serde_json::to_string(&ledger).unwrap()).unwrap();

    let store = open_store(&base);
    assert!(store.category(&CategoryId::fallback()).is_some());
    assert!(!store.load_report().warnings.is_empty());
}

#[test]
fn failed_write_keeps_file_and_memory_state() {
    let base = temp_base();
    let mut store = open_store(&base);
    store.save().unwrap();
    let path = slot_file(&base);
    let original = fs::read_to_string(&path).unwrap();

    // A directory at the temp path makes the atomic write fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();
    let result = store.add_transaction(NewTransaction::new(
        -4.0,
        date(2024, 1, 3),
        "Bus fare",
        CategoryId::new("transportation"),
    ));
    assert!(result.is_err(), "write into a directory must fail");
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(store.transactions().len(), 7);
}

#[test]
fn reset_rewrites_slot_with_seed() {
    let base = temp_base();
    let mut store = open_store_with(&base, SeedPolicy::CategoriesOnly);
    store
        .add_transaction(NewTransaction::new(
            -10.0,
            date(2024, 5, 1),
            "Parking",
            CategoryId::new("transportation"),
        ))
        .unwrap();
    store.reset().unwrap();
    assert!(store.transactions().is_empty());

    let storage = json_storage(&base);
    let raw = storage.read_slot(DEFAULT_SLOT).unwrap().unwrap();
    let persisted: Ledger = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.category_count(), 6);
    assert!(persisted.transactions.is_empty());
}

#[test]
fn slots_are_independent() {
    let base = temp_base();
    let mut household =
        FinanceStore::open(Box::new(json_storage(&base)), "household").unwrap();
    household
        .add_category(NewCategory::new("Garden", "#22c55e", 40.0))
        .unwrap();

    let default = open_store(&base);
    assert_eq!(default.categories().len(), 6);
    let reopened = FinanceStore::open(Box::new(json_storage(&base)), "household").unwrap();
    assert_eq!(reopened.categories().len(), 7);
}
