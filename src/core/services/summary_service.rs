use serde::Serialize;

use crate::domain::{CategoryId, MonthKey, Transaction};
use crate::ledger::Ledger;

use super::{BudgetService, TransactionService};

/// Expenses recorded for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category_id: CategoryId,
    pub name: String,
    pub color: String,
    pub amount: f64,
    /// Share of the period's total expenses, in percent.
    pub share: f64,
}

/// Expense total for a single month bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyExpense {
    pub month: MonthKey,
    pub label: &'static str,
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub month: MonthKey,
    pub total_budget: f64,
    pub total_expenses: f64,
    pub total_income: f64,
    /// Negative when spending exceeds the budget.
    pub budget_remaining: f64,
    pub budget_percentage: f64,
    pub recent_transactions: Vec<Transaction>,
    pub top_categories: Vec<CategoryShare>,
}

impl DashboardSummary {
    pub fn is_over_budget(&self) -> bool {
        self.budget_percentage > 100.0
    }
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard(ledger: &Ledger, month: MonthKey, recent_limit: usize) -> DashboardSummary {
        let total_budget = BudgetService::monthly_budget_total(ledger);
        let total_expenses = BudgetService::total_expenses(ledger, Some(month));
        DashboardSummary {
            month,
            total_budget,
            total_expenses,
            total_income: BudgetService::total_income(ledger, Some(month)),
            budget_remaining: total_budget - total_expenses,
            budget_percentage: BudgetService::overall_progress(ledger, Some(month)),
            recent_transactions: TransactionService::recent(ledger, recent_limit)
                .into_iter()
                .cloned()
                .collect(),
            top_categories: Self::category_breakdown(ledger, Some(month)),
        }
    }

    /// Expense totals for the `months` buckets ending at `reference`, oldest first.
    pub fn monthly_expenses(ledger: &Ledger, reference: MonthKey, months: usize) -> Vec<MonthlyExpense> {
        let mut series: Vec<_> = reference
            .recent(months)
            .into_iter()
            .map(|month| MonthlyExpense {
                month,
                label: month.short_label(),
                expenses: BudgetService::total_expenses(ledger, Some(month)),
            })
            .collect();
        series.reverse();
        series
    }

    /// Categories with spending in the period, largest first.
    pub fn category_breakdown(ledger: &Ledger, month: Option<MonthKey>) -> Vec<CategoryShare> {
        let mut shares: Vec<_> = ledger
            .categories
            .iter()
            .map(|category| CategoryShare {
                category_id: category.id.clone(),
                name: category.name.clone(),
                color: category.color.clone(),
                amount: BudgetService::total_expenses_by_category(ledger, &category.id, month),
                share: 0.0,
            })
            .filter(|share| share.amount > 0.0)
            .collect();
        let total: f64 = shares.iter().map(|share| share.amount).sum();
        for entry in &mut shares {
            entry.share = entry.amount / total * 100.0;
        }
        shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        shares
    }
}
