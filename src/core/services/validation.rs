//! Input rules applied by callers before they hand data to the store.
//! The store itself never re-validates.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{CategoryId, NewCategory, NewTransaction};
use crate::ledger::Ledger;

use super::{ServiceError, ServiceResult};

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("hex color pattern compiles")
});

/// Whether an entered amount is money spent or money received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    pub fn parse(raw: &str) -> ServiceResult<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "expense" | "exp" | "-" => Ok(EntryKind::Expense),
            "income" | "inc" | "+" => Ok(EntryKind::Income),
            other => Err(ServiceError::Invalid(format!(
                "unknown entry kind `{}` (use expense or income)",
                other
            ))),
        }
    }

    /// Signs a magnitude: expenses become negative, income positive.
    pub fn apply(self, magnitude: f64) -> f64 {
        match self {
            EntryKind::Expense => -magnitude.abs(),
            EntryKind::Income => magnitude.abs(),
        }
    }

    pub fn of(amount: f64) -> Self {
        if amount < 0.0 {
            EntryKind::Expense
        } else {
            EntryKind::Income
        }
    }
}

pub fn validate_name(raw: &str) -> ServiceResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ServiceError::Invalid("Category name is required".into()));
    }
    Ok(name.to_string())
}

pub fn validate_color(raw: &str) -> ServiceResult<String> {
    let color = raw.trim();
    if !HEX_COLOR.is_match(color) {
        return Err(ServiceError::Invalid(
            "Please enter a valid hex color code".into(),
        ));
    }
    Ok(color.to_string())
}

pub fn parse_budget(raw: &str) -> ServiceResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ServiceError::Invalid(
            "Budget must be a positive number".into(),
        )),
    }
}

pub fn parse_amount(raw: &str) -> ServiceResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ServiceError::Invalid("Amount must be a number".into())),
    }
}

pub fn parse_date(raw: &str) -> ServiceResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ServiceError::Invalid(format!("invalid date `{}` (expected YYYY-MM-DD)", raw))
    })
}

pub fn validate_description(raw: &str) -> ServiceResult<String> {
    let description = raw.trim();
    if description.is_empty() {
        return Err(ServiceError::Invalid("Description is required".into()));
    }
    Ok(description.to_string())
}

pub fn validate_category_ref(ledger: &Ledger, raw: &str) -> ServiceResult<CategoryId> {
    let id = CategoryId::new(raw.trim());
    if ledger.has_category(&id) {
        Ok(id)
    } else {
        Err(ServiceError::Invalid(format!(
            "Please select a category (`{}` does not exist)",
            raw
        )))
    }
}

/// Validates raw category form input.
pub fn category_input(name: &str, color: &str, budget: &str) -> ServiceResult<NewCategory> {
    Ok(NewCategory::new(
        validate_name(name)?,
        validate_color(color)?,
        parse_budget(budget)?,
    ))
}

/// Validates raw transaction form input. `amount` is a magnitude signed by `kind`.
pub fn transaction_input(
    ledger: &Ledger,
    kind: EntryKind,
    amount: &str,
    date: &str,
    description: &str,
    category: &str,
) -> ServiceResult<NewTransaction> {
    Ok(NewTransaction::new(
        kind.apply(parse_amount(amount)?),
        parse_date(date)?,
        validate_description(description)?,
        validate_category_ref(ledger, category)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_accept_short_and_long_forms() {
        assert!(validate_color("#3B82F6").is_ok());
        assert!(validate_color("#abc").is_ok());
        assert!(validate_color("3B82F6").is_err());
        assert!(validate_color("#12345").is_err());
        assert!(validate_color("hsl(var(--chart-1))").is_err());
    }

    #[test]
    fn budget_must_be_non_negative_number() {
        assert_eq!(parse_budget("0").unwrap(), 0.0);
        assert_eq!(parse_budget(" 250.5 ").unwrap(), 250.5);
        assert!(parse_budget("-1").is_err());
        assert!(parse_budget("lots").is_err());
    }

    #[test]
    fn category_input_rejects_blank_name() {
        let err = category_input("   ", "#fff", "10").unwrap_err();
        assert!(err.to_string().contains("name is required"));
        let ok = category_input(" Pets ", "#fff", "10").unwrap();
        assert_eq!(ok.name, "Pets");
    }

    #[test]
    fn transaction_input_signs_by_kind() {
        let ledger = Ledger::seeded();
        let expense =
            transaction_input(&ledger, EntryKind::Expense, "20", "2024-02-01", "Lunch", "food")
                .unwrap();
        assert_eq!(expense.amount, -20.0);
        let income =
            transaction_input(&ledger, EntryKind::Income, "-20", "2024-02-01", "Refund", "food")
                .unwrap();
        assert_eq!(income.amount, 20.0);
    }

    #[test]
    fn transaction_input_requires_known_category_and_date() {
        let ledger = Ledger::seeded();
        assert!(
            transaction_input(&ledger, EntryKind::Expense, "1", "2024-02-01", "x", "pets").is_err()
        );
        assert!(
            transaction_input(&ledger, EntryKind::Expense, "1", "02/01/2024", "x", "food").is_err()
        );
        assert!(
            transaction_input(&ledger, EntryKind::Expense, "abc", "2024-02-01", "x", "food")
                .is_err()
        );
    }

    #[test]
    fn entry_kind_parses_aliases() {
        assert_eq!(EntryKind::parse("Expense").unwrap(), EntryKind::Expense);
        assert_eq!(EntryKind::parse("inc").unwrap(), EntryKind::Income);
        assert!(EntryKind::parse("transfer").is_err());
        assert_eq!(EntryKind::of(-3.0), EntryKind::Expense);
    }
}
