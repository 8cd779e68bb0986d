use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Average days per month, used for daily-equivalent income.
pub const DAYS_PER_MONTH: f64 = 30.42;

/// Average weeks per month, used for weekly-equivalent income.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Average biweekly pay periods per month.
pub const BIWEEKLY_PERIODS_PER_MONTH: f64 = 2.17;

/// Category of an income source. Grouping and display only; it has no
/// effect on forecasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    Employment,
    Business,
    Investments,
    Rental,
    Freelance,
    Other,
}

impl std::fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncomeCategory::Employment => write!(f, "Employment"),
            IncomeCategory::Business => write!(f, "Business"),
            IncomeCategory::Investments => write!(f, "Investments"),
            IncomeCategory::Rental => write!(f, "Rental"),
            IncomeCategory::Freelance => write!(f, "Freelance"),
            IncomeCategory::Other => write!(f, "Other"),
        }
    }
}

/// How often a source pays out. Only used to normalize the entered amount
/// to a monthly equivalent; all downstream math works in months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Annually,
}

impl Frequency {
    /// Convert an amount paid at this frequency to its monthly equivalent.
    #[must_use]
    pub fn to_monthly(&self, amount: f64) -> f64 {
        match self {
            Frequency::Weekly => amount * WEEKS_PER_MONTH,
            Frequency::Biweekly => amount * BIWEEKLY_PERIODS_PER_MONTH,
            Frequency::Monthly => amount,
            Frequency::Annually => amount / 12.0,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Weekly => write!(f, "Weekly"),
            Frequency::Biweekly => write!(f, "Biweekly"),
            Frequency::Monthly => write!(f, "Monthly"),
            Frequency::Annually => write!(f, "Annually"),
        }
    }
}

/// Whether a source pays the same amount every month or fluctuates.
/// Selects the forecasting policy: Fixed sources are never extrapolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Consistency {
    Fixed,
    Variable,
}

impl std::fmt::Display for Consistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Consistency::Fixed => write!(f, "Fixed"),
            Consistency::Variable => write!(f, "Variable"),
        }
    }
}

/// A single income stream (salary, side business, rental, ...).
///
/// **Equality and hashing** are based solely on the `id` field, so two
/// sources with the same name and amount are still distinct streams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSource {
    /// Unique identifier
    pub id: Uuid,

    /// Display name (e.g., "Salary", "Etsy shop")
    pub name: String,

    /// Income category for grouping
    pub category: IncomeCategory,

    /// How often this source pays out (already folded into `monthly_amount`)
    pub frequency: Frequency,

    /// Fixed (same every month) or Variable (fluctuates)
    pub consistency: Consistency,

    /// Monthly-equivalent amount. For a Variable source this is replaced by
    /// the mean of its observations whenever history changes.
    pub monthly_amount: f64,

    /// Observed amounts keyed by month offset (negative = past, 0 = current
    /// month). A month holds at most one value by construction.
    #[serde(default)]
    pub history: BTreeMap<i32, f64>,
}

impl PartialEq for IncomeSource {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for IncomeSource {}

impl std::hash::Hash for IncomeSource {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl IncomeSource {
    /// Create a new source with a fresh id and no history. `amount` is the
    /// amount per `frequency` pay period and is normalized to a monthly
    /// equivalent here.
    pub fn new(
        name: impl Into<String>,
        category: IncomeCategory,
        frequency: Frequency,
        consistency: Consistency,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            frequency,
            consistency,
            monthly_amount: frequency.to_monthly(amount),
            history: BTreeMap::new(),
        }
    }

    /// Daily-equivalent income using the average month length.
    #[must_use]
    pub fn daily_amount(&self) -> f64 {
        self.monthly_amount / DAYS_PER_MONTH
    }

    /// Weekly-equivalent income using the average weeks per month.
    #[must_use]
    pub fn weekly_amount(&self) -> f64 {
        self.monthly_amount / WEEKS_PER_MONTH
    }

    /// Number of recorded historical observations.
    #[must_use]
    pub fn observation_count(&self) -> usize {
        self.history.len()
    }

    /// Mean of all recorded observations, or None with no history.
    #[must_use]
    pub fn observed_mean(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        let sum: f64 = self.history.values().sum();
        Some(sum / self.history.len() as f64)
    }
}
