use serde::{Deserialize, Serialize};

use super::source::IncomeSource;
use super::transaction::{PlannedExpense, Transaction};

/// The main data container. Everything the engine operates on lives here;
/// persisting it (files, database rows) is the surrounding application's
/// job, with JSON as the exchange format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    /// All income sources with their recorded history
    pub sources: Vec<IncomeSource>,

    /// Planned recurring monthly expenses
    pub expenses: Vec<PlannedExpense>,

    /// Recorded transactions (actual spend), ordered by date
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Monthly savings target as entered. Values below 100 are read as a
    /// percentage of income, anything else as an absolute amount.
    #[serde(default)]
    pub savings_target: f64,
}
