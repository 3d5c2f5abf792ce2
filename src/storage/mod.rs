pub mod json_backend;
pub mod memory_backend;

use crate::errors::FinanceError;

pub type Result<T> = std::result::Result<T, FinanceError>;

/// Key-value persistence for serialized store snapshots. Each slot holds one
/// opaque document.
pub trait StorageBackend: Send + Sync {
    /// Returns the slot contents, or `None` when nothing has been written yet.
    fn read_slot(&self, slot: &str) -> Result<Option<String>>;
    fn write_slot(&self, slot: &str, contents: &str) -> Result<()>;
    /// Removes the slot. Clearing a missing slot succeeds.
    fn clear_slot(&self, slot: &str) -> Result<()>;

    fn has_slot(&self, slot: &str) -> Result<bool> {
        Ok(self.read_slot(slot)?.is_some())
    }
}

pub use json_backend::JsonStorage;
pub use memory_backend::MemoryStorage;
