//! Business logic helpers for managing transactions.

use std::cmp::Reverse;

use crate::domain::{
    CategoryId, MonthKey, NewTransaction, Transaction, TransactionFilter, TransactionId,
    TransactionUpdate,
};
use crate::ledger::Ledger;

/// CRUD and listing helpers for ledger transactions. Mutations are total:
/// unknown ids leave the ledger untouched.
pub struct TransactionService;

impl TransactionService {
    /// Appends a new transaction with a fresh identifier.
    pub fn add(ledger: &mut Ledger, data: NewTransaction) -> TransactionId {
        let id = TransactionId::new_v4();
        ledger.add_transaction(data.into_transaction(id))
    }

    /// Applies `update` to the transaction identified by `id`.
    /// Returns `false` when no such transaction exists.
    pub fn update(ledger: &mut Ledger, id: TransactionId, update: TransactionUpdate) -> bool {
        match ledger.transaction_mut(id) {
            Some(txn) => {
                update.apply(txn);
                true
            }
            None => false,
        }
    }

    /// Removes the transaction identified by `id`, returning it when present.
    pub fn remove(ledger: &mut Ledger, id: TransactionId) -> Option<Transaction> {
        ledger.remove_transaction(id)
    }

    /// Transactions in the `month` bucket, in store order.
    pub fn by_month(ledger: &Ledger, month: MonthKey) -> Vec<&Transaction> {
        ledger
            .transactions
            .iter()
            .filter(|txn| month.contains(txn.date))
            .collect()
    }

    /// Transactions assigned to `category_id`, in store order.
    pub fn by_category<'a>(ledger: &'a Ledger, category_id: &CategoryId) -> Vec<&'a Transaction> {
        ledger
            .transactions
            .iter()
            .filter(|txn| &txn.category_id == category_id)
            .collect()
    }

    /// Transactions matching `filter`, newest first.
    pub fn filtered<'a>(ledger: &'a Ledger, filter: &TransactionFilter) -> Vec<&'a Transaction> {
        let mut matches: Vec<_> = ledger
            .transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect();
        matches.sort_by_key(|txn| Reverse(txn.date));
        matches
    }

    /// The `limit` most recent transactions across all months.
    pub fn recent(ledger: &Ledger, limit: usize) -> Vec<&Transaction> {
        let mut all = Self::filtered(ledger, &TransactionFilter::default());
        all.truncate(limit);
        all
    }
}
