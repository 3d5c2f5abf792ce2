//! Domain types representing spending categories.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Reserved category that absorbs transactions whose category was deleted.
/// It can never be removed from a ledger.
pub const FALLBACK_CATEGORY_ID: &str = "other";

/// Identifier of a category. Seeded categories use well-known slugs,
/// user-created ones receive a generated UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_CATEGORY_ID.to_string())
    }

    pub fn is_fallback(&self) -> bool {
        self.0 == FALLBACK_CATEGORY_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A named spending bucket with a display color and an optional monthly budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Monthly ceiling; `0` means no budget is set.
    #[serde(default)]
    pub budget_amount: f64,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>, budget_amount: f64) -> Self {
        Self {
            id: CategoryId::generate(),
            name: name.into(),
            color: color.into(),
            icon: None,
            budget_amount,
        }
    }

    pub fn with_id(mut self, id: CategoryId) -> Self {
        self.id = id;
        self
    }

    pub fn has_budget(&self) -> bool {
        self.budget_amount > 0.0
    }
}

impl Identifiable for Category {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// Field values for a category that does not have an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
    pub budget_amount: f64,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>, budget_amount: f64) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            icon: None,
            budget_amount,
        }
    }

    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            color: self.color,
            icon: self.icon,
            budget_amount: self.budget_amount,
        }
    }
}

/// Partial update for a category; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub budget_amount: Option<f64>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.color.is_none()
            && self.icon.is_none()
            && self.budget_amount.is_none()
    }

    pub fn apply(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(color) = self.color {
            category.color = color;
        }
        if let Some(icon) = self.icon {
            category.icon = Some(icon);
        }
        if let Some(budget_amount) = self.budget_amount {
            category.budget_amount = budget_amount;
        }
    }
}
