//! Expense aggregates and budget tracking. Every figure is recomputed from
//! the ledger on each call.

use serde::Serialize;

use crate::domain::{CategoryId, MonthKey, Transaction};
use crate::ledger::Ledger;

/// Planned versus actual spending for one budgeted category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub category_id: CategoryId,
    pub name: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub overspent: f64,
    pub percent: f64,
}

pub struct BudgetService;

impl BudgetService {
    /// Sum of the absolute values of negative amounts for `category_id`,
    /// optionally scoped to `month`.
    pub fn total_expenses_by_category(
        ledger: &Ledger,
        category_id: &CategoryId,
        month: Option<MonthKey>,
    ) -> f64 {
        sum_expenses(
            ledger
                .transactions
                .iter()
                .filter(|txn| &txn.category_id == category_id),
            month,
        )
    }

    /// Expenses across every category, optionally scoped to `month`.
    pub fn total_expenses(ledger: &Ledger, month: Option<MonthKey>) -> f64 {
        sum_expenses(ledger.transactions.iter(), month)
    }

    /// Sum of positive amounts, optionally scoped to `month`.
    pub fn total_income(ledger: &Ledger, month: Option<MonthKey>) -> f64 {
        ledger
            .transactions
            .iter()
            .filter(|txn| txn.is_income() && txn.in_month(month))
            .map(|txn| txn.amount)
            .sum()
    }

    /// Spent-to-budget ratio in percent. Unknown categories and categories
    /// without a budget report `0`.
    pub fn budget_progress(ledger: &Ledger, category_id: &CategoryId, month: Option<MonthKey>) -> f64 {
        let Some(category) = ledger.category(category_id) else {
            return 0.0;
        };
        if category.budget_amount == 0.0 {
            return 0.0;
        }
        let expenses = Self::total_expenses_by_category(ledger, category_id, month);
        expenses / category.budget_amount * 100.0
    }

    pub fn monthly_budget_total(ledger: &Ledger) -> f64 {
        ledger
            .categories
            .iter()
            .map(|category| category.budget_amount)
            .sum()
    }

    /// Overall spending as a percentage of the summed budgets; `0` when no
    /// budget is set.
    pub fn overall_progress(ledger: &Ledger, month: Option<MonthKey>) -> f64 {
        let budget = Self::monthly_budget_total(ledger);
        if budget > 0.0 {
            Self::total_expenses(ledger, month) / budget * 100.0
        } else {
            0.0
        }
    }

    /// Budgeted categories with their spending, highest spend first.
    pub fn budget_comparison(ledger: &Ledger, month: Option<MonthKey>) -> Vec<BudgetComparison> {
        let mut rows: Vec<_> = ledger
            .categories
            .iter()
            .filter(|category| category.has_budget())
            .map(|category| {
                let spent = Self::total_expenses_by_category(ledger, &category.id, month);
                let budget = category.budget_amount;
                BudgetComparison {
                    category_id: category.id.clone(),
                    name: category.name.clone(),
                    budget,
                    spent,
                    remaining: (budget - spent).max(0.0),
                    overspent: (spent - budget).max(0.0),
                    percent: spent / budget * 100.0,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.spent.total_cmp(&a.spent));
        rows
    }
}

fn sum_expenses<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
    month: Option<MonthKey>,
) -> f64 {
    transactions
        .filter(|txn| txn.is_expense() && txn.in_month(month))
        .map(|txn| txn.amount)
        .sum::<f64>()
        .abs()
}
