use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::errors::FinanceError;

use super::{Result, StorageBackend};

/// In-process slot map. Clones share the same slots, so a test can keep a
/// handle and inspect what a store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(slot: &str, contents: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.write() {
            slots.insert(slot.to_string(), contents.into());
        }
        storage
    }

    pub fn slot_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .slots
            .read()
            .map(|slots| slots.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

fn poisoned() -> FinanceError {
    FinanceError::Storage("memory storage lock poisoned".into())
}

impl StorageBackend for MemoryStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        let slots = self.slots.read().map_err(|_| poisoned())?;
        Ok(slots.get(slot).cloned())
    }

    fn write_slot(&self, slot: &str, contents: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }

    fn clear_slot(&self, slot: &str) -> Result<()> {
        let mut slots = self.slots.write().map_err(|_| poisoned())?;
        slots.remove(slot);
        Ok(())
    }
}
