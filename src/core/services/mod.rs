pub mod budget_service;
pub mod category_service;
pub mod summary_service;
pub mod transaction_service;
pub mod validation;

pub use budget_service::{BudgetComparison, BudgetService};
pub use category_service::CategoryService;
pub use summary_service::{CategoryShare, DashboardSummary, MonthlyExpense, SummaryService};
pub use transaction_service::TransactionService;

use crate::errors::FinanceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error("{0}")]
    Invalid(String),
}
