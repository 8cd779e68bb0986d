use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single recorded spend. Granularity is the day; sub-day ordering is
/// not tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Amount spent
    pub amount: f64,

    /// Free-form category label (e.g., "Groceries")
    pub category: String,

    /// Date of the spend
    pub date: NaiveDate,
}

impl Transaction {
    /// Create a new transaction with a fresh id.
    pub fn new(amount: f64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category: category.into(),
            date,
        }
    }
}

/// A recurring monthly expense the user plans for (rent, subscriptions, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedExpense {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Planned monthly amount
    pub amount: f64,
}

impl PlannedExpense {
    /// Create a new planned expense with a fresh id.
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
        }
    }
}
