//! Built-in data used when no persisted snapshot is available.

use chrono::NaiveDate;

use crate::domain::{Category, CategoryId, Transaction, FALLBACK_CATEGORY_ID};

const DEFAULT_CATEGORIES: [(&str, &str, &str, f64); 6] = [
    ("food", "Food & Dining", "hsl(var(--chart-1))", 500.0),
    ("housing", "Housing", "hsl(var(--chart-2))", 1200.0),
    ("transportation", "Transportation", "hsl(var(--chart-3))", 300.0),
    ("entertainment", "Entertainment", "hsl(var(--chart-4))", 200.0),
    ("utilities", "Utilities", "hsl(var(--chart-5))", 250.0),
    (FALLBACK_CATEGORY_ID, "Other", "hsl(var(--muted-foreground))", 300.0),
];

const SAMPLE_TRANSACTIONS: [(f64, (i32, u32, u32), &str, &str); 6] = [
    (-55.99, (2023, 12, 5), "Grocery shopping", "food"),
    (-12.50, (2023, 12, 7), "Movie tickets", "entertainment"),
    (-1200.0, (2023, 12, 1), "Rent payment", "housing"),
    (-42.30, (2023, 11, 25), "Gas station", "transportation"),
    (-120.75, (2023, 11, 20), "Electricity bill", "utilities"),
    (-85.63, (2023, 10, 15), "Internet service", "utilities"),
];

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, color, budget)| {
            Category::new(*name, *color, *budget).with_id(CategoryId::new(*id))
        })
        .collect()
}

pub fn fallback_category() -> Category {
    default_categories()
        .into_iter()
        .find(|category| category.id.is_fallback())
        .unwrap_or_else(|| Category::new("Other", "#6b7280", 0.0).with_id(CategoryId::fallback()))
}

pub fn sample_transactions() -> Vec<Transaction> {
    SAMPLE_TRANSACTIONS
        .iter()
        .filter_map(|(amount, (y, m, d), description, category)| {
            let date = NaiveDate::from_ymd_opt(*y, *m, *d)?;
            Some(Transaction::new(
                *amount,
                date,
                *description,
                CategoryId::new(*category),
            ))
        })
        .collect()
}
