use crate::domain::{Category, CategoryId, CategoryUpdate, NewCategory};
use crate::ledger::Ledger;

use super::{ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    pub fn add(ledger: &mut Ledger, data: NewCategory) -> CategoryId {
        ledger.add_category(data.into_category(CategoryId::generate()))
    }

    /// Applies `update` to the matching category. Returns `false` when absent.
    pub fn update(ledger: &mut Ledger, id: &CategoryId, update: CategoryUpdate) -> bool {
        match ledger.category_mut(id) {
            Some(category) => {
                update.apply(category);
                true
            }
            None => false,
        }
    }

    /// Deletes a category after moving its transactions to the fallback
    /// category. The fallback itself is never removed.
    ///
    /// Returns `true` when a category record was removed.
    pub fn remove(ledger: &mut Ledger, id: &CategoryId) -> bool {
        if id.is_fallback() {
            tracing::debug!(category = %id, "refusing to delete fallback category");
            return false;
        }
        let fallback = CategoryId::fallback();
        let mut reassigned = 0usize;
        for txn in ledger
            .transactions
            .iter_mut()
            .filter(|txn| &txn.category_id == id)
        {
            txn.category_id = fallback.clone();
            reassigned += 1;
        }
        let removed = ledger.remove_category(id).is_some();
        tracing::debug!(category = %id, reassigned, removed, "deleted category");
        removed
    }

    /// Caller-side guard run before [`CategoryService::remove`].
    pub fn ensure_removable(ledger: &Ledger, id: &CategoryId) -> ServiceResult<()> {
        if ledger.category_count() <= 1 {
            return Err(ServiceError::Invalid(
                "You must have at least one category.".into(),
            ));
        }
        if id.is_fallback() {
            return Err(ServiceError::Invalid(format!(
                "Category `{}` is the fallback category and cannot be deleted",
                id
            )));
        }
        if !ledger.has_category(id) {
            return Err(ServiceError::Invalid("Category not found".into()));
        }
        Ok(())
    }

    pub fn list(ledger: &Ledger) -> Vec<&Category> {
        ledger.categories.iter().collect()
    }
}
