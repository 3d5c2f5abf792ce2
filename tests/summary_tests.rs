mod common;

use common::{approx_eq, date, setup_test_env};
use finance_core::core::services::{BudgetService, SummaryService};
use finance_core::domain::{CategoryId, MonthKey, NewTransaction};

fn december() -> MonthKey {
    MonthKey::new(2023, 12).unwrap()
}

#[test]
fn dashboard_for_seed_december() {
    let (store, _base) = setup_test_env();
    let summary = SummaryService::dashboard(store.snapshot(), december(), 5);
    assert!(approx_eq(summary.total_budget, 2750.0));
    assert!(approx_eq(summary.total_expenses, 1268.49));
    assert!(approx_eq(summary.total_income, 0.0));
    assert!(approx_eq(summary.budget_percentage, 1268.49 / 2750.0 * 100.0));
    assert_eq!(summary.recent_transactions.len(), 5);
    assert_eq!(summary.recent_transactions[0].description, "Movie tickets");
}

#[test]
fn overspending_flags_dashboard_and_comparison() {
    let (mut store, _base) = setup_test_env();
    store
        .add_transaction(NewTransaction::new(
            -2000.0,
            date(2023, 12, 24),
            "New sofa",
            CategoryId::new("housing"),
        ))
        .unwrap();

    let summary = SummaryService::dashboard(store.snapshot(), december(), 5);
    assert!(summary.is_over_budget());
    assert!(summary.budget_remaining < 0.0);

    let rows = BudgetService::budget_comparison(store.snapshot(), Some(december()));
    let housing = &rows[0];
    assert_eq!(housing.category_id, CategoryId::new("housing"));
    assert!(approx_eq(housing.overspent, 2000.0));
    assert!(approx_eq(housing.remaining, 0.0));
}

#[test]
fn monthly_series_is_oldest_first_and_zero_filled() {
    let (store, _base) = setup_test_env();
    let series = SummaryService::monthly_expenses(store.snapshot(), december(), 4);
    let labels: Vec<_> = series.iter().map(|point| point.label).collect();
    assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec"]);
    assert!(approx_eq(series[0].expenses, 0.0));
    assert!(approx_eq(series[1].expenses, 85.63));
    assert!(approx_eq(series[2].expenses, 163.05));
    assert!(approx_eq(series[3].expenses, 1268.49));
}

#[test]
fn breakdown_shares_sum_to_one_hundred() {
    let (store, _base) = setup_test_env();
    let shares = SummaryService::category_breakdown(store.snapshot(), Some(december()));
    let names: Vec<_> = shares.iter().map(|share| share.name.as_str()).collect();
    assert_eq!(names, vec!["Housing", "Food & Dining", "Entertainment"]);
    let total: f64 = shares.iter().map(|share| share.share).sum();
    assert!((total - 100.0).abs() < 1e-6);
}

#[test]
fn empty_month_has_no_breakdown() {
    let (store, _base) = setup_test_env();
    let july = MonthKey::new(2024, 7).unwrap();
    assert!(SummaryService::category_breakdown(store.snapshot(), Some(july)).is_empty());
    assert!(approx_eq(BudgetService::overall_progress(store.snapshot(), Some(july)), 0.0));
}
