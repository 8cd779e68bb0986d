use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What losing one income source would do to total monthly income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceImpact {
    /// The source removed in the what-if
    pub source_id: Uuid,

    /// Source display name
    pub name: String,

    /// Its monthly-equivalent amount
    pub monthly_amount: f64,

    /// Total monthly income with the source still present
    pub total_income: f64,

    /// Total monthly income after removing the source
    pub remaining_income: f64,

    /// The source's share of total income in percent (0 when total is 0)
    pub share_pct: f64,
}

/// Configuration for the Monte Carlo income simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Months to project forward, starting from the current month
    pub months: usize,

    /// Number of simulation runs (capped by the service)
    pub runs: usize,

    /// Optional seed for reproducible output
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            months: 24,
            runs: 100,
            seed: None,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new(months: usize, runs: usize) -> Self {
        Self {
            months,
            runs,
            seed: None,
        }
    }

    /// Set a seed so repeated simulations produce identical output.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Median projected income path from the Monte Carlo simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSimulation {
    /// Median projected amount per month, starting from the current month
    pub median: Vec<f64>,

    /// Months projected
    pub months: usize,

    /// Runs actually performed, after capping
    pub runs: usize,
}

/// Mean observed income for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    /// Calendar month number, 1 = January
    pub month: u32,

    /// Month label, e.g. "Jan"
    pub label: String,

    /// Mean of the observations falling in this calendar month
    pub mean: f64,
}

/// A source's observed income grouped by calendar month.
///
/// Months without any observation are omitted rather than zero-filled, so
/// a thin history never fakes a flat season.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityProfile {
    /// Per-calendar-month means, ordered January through December
    pub months: Vec<MonthlyAverage>,

    /// Mean across the month means above (0 with no observations)
    pub overall_mean: f64,
}
