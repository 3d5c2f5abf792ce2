#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use finance_core::{
    core::utils::PathResolver, storage::JsonStorage, FinanceStore, SeedPolicy, DEFAULT_SLOT,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a fresh application directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn json_storage(base: &PathBuf) -> JsonStorage {
    JsonStorage::new(Some(PathResolver::store_dir_in(base))).expect("create json storage backend")
}

/// Opens the default slot under `base`, seeding sample data when empty.
pub fn open_store(base: &PathBuf) -> FinanceStore {
    open_store_with(base, SeedPolicy::Sample)
}

pub fn open_store_with(base: &PathBuf, seed: SeedPolicy) -> FinanceStore {
    FinanceStore::open_with(Box::new(json_storage(base)), DEFAULT_SLOT, seed)
        .expect("open finance store")
}

/// Isolated store backed by its own temp directory.
pub fn setup_test_env() -> (FinanceStore, PathBuf) {
    let base = temp_base();
    (open_store(&base), base)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn approx_eq(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
