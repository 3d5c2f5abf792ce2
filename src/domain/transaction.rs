//! Domain types describing dated income and expense events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{category::CategoryId, common::*, month::MonthKey};

pub type TransactionId = Uuid;

/// A single dated monetary event. Negative amounts are expenses, positive
/// amounts are income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: CategoryId,
}

impl Transaction {
    pub fn new(
        amount: f64,
        date: NaiveDate,
        description: impl Into<String>,
        category_id: CategoryId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            date,
            description: description.into(),
            category_id,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    /// True when no month is given or the transaction falls in `month`.
    pub fn in_month(&self, month: Option<MonthKey>) -> bool {
        month.map_or(true, |key| key.contains(self.date))
    }
}

impl Identifiable for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &TransactionId {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} ({:.2})", self.date, self.description, self.amount)
    }
}

/// Field values for a transaction that does not have an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: CategoryId,
}

impl NewTransaction {
    pub fn new(
        amount: f64,
        date: NaiveDate,
        description: impl Into<String>,
        category_id: CategoryId,
    ) -> Self {
        Self {
            amount,
            date,
            description: description.into(),
            category_id,
        }
    }

    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            date: self.date,
            description: self.description,
            category_id: self.category_id,
        }
    }
}

/// Partial update for a transaction; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
    }

    pub fn apply(self, transaction: &mut Transaction) {
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(description) = self.description {
            transaction.description = description;
        }
        if let Some(category_id) = self.category_id {
            transaction.category_id = category_id;
        }
    }
}

/// Optional month and category constraints for transaction listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub month: Option<MonthKey>,
    pub category: Option<CategoryId>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        transaction.in_month(self.month)
            && self
                .category
                .as_ref()
                .map_or(true, |id| &transaction.category_id == id)
    }
}
