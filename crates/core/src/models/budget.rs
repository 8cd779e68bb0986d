use serde::{Deserialize, Serialize};

/// Qualitative savings outlook for the current month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingsStatus {
    /// Projected month-end savings meet or beat the target
    OnTrack,
    /// Projected month-end savings fall short of the target
    Behind,
}

impl std::fmt::Display for SavingsStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SavingsStatus::OnTrack => write!(f, "On Track"),
            SavingsStatus::Behind => write!(f, "Behind"),
        }
    }
}

/// Raw inputs for one month's budget computation.
///
/// Usually assembled from the plan and an explicit `today`, but can be
/// built directly when no plan state is involved. Everything the
/// calculation needs is in here; there is no ambient state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInputs {
    /// Total monthly income across all sources
    pub monthly_income: f64,

    /// Sum of planned monthly expenses
    pub planned_expenses: f64,

    /// Savings target as entered. Values below 100 are read as a
    /// percentage of income, anything else as an absolute amount.
    pub savings_target: f64,

    /// Actual recorded spend so far this calendar month
    pub spent_to_date: f64,

    /// Number of days in the current month (28-31)
    pub days_in_month: u32,

    /// Current day of month, 1-indexed
    pub current_day: u32,
}

/// Derived day-level budget metrics for the current month.
///
/// All the adaptive arithmetic lives in `BudgetService::snapshot`; this is
/// the result record a frontend renders as summary cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    /// Income spread evenly across the month: income / days in month
    pub base_daily_budget: f64,

    /// Base budget corrected for actual pace: the surplus or deficit to
    /// date is redistributed evenly over the remaining days
    pub adjusted_daily_budget: f64,

    /// Adjusted daily budget scaled to a week
    pub adjusted_weekly_budget: f64,

    /// Days left in the month, today included (always >= 1)
    pub days_remaining: u32,

    /// What linear pacing says should have been spent before today
    pub expected_spend_to_date: f64,

    /// What was actually spent before today
    pub actual_spend_to_date: f64,

    /// Expected minus actual; positive = under budget, negative = overspent
    pub saved_to_date: f64,

    /// Surplus counted toward savings, floored at 0. An overspend lowers
    /// the adjusted daily budget instead of showing negative savings.
    pub current_savings: f64,

    /// Savings target resolved to an absolute monthly amount
    pub savings_target_amount: f64,

    /// Savings balance if the adjusted pace holds to month end
    pub projected_month_end_savings: f64,

    /// On Track or Behind versus the resolved target
    pub savings_target_status: SavingsStatus,

    /// Savings progress in percent, unclamped (0 when the target is 0)
    pub savings_progress_pct: f64,

    /// Planned expenses as a percentage of income (0 when income is 0)
    pub expense_pct_of_income: f64,

    /// Actual spend as a percentage of income (0 when income is 0)
    pub spent_pct_of_income: f64,
}

impl BudgetSnapshot {
    /// Savings progress clamped to 100 for gauge display.
    #[must_use]
    pub fn display_progress_pct(&self) -> f64 {
        self.savings_progress_pct.min(100.0)
    }
}

/// How this month's daily spending compared to a reference daily budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPattern {
    /// Days whose total spend stayed at or under the reference budget
    pub days_under_budget: usize,

    /// Days whose total spend exceeded the reference budget
    pub days_over_budget: usize,

    /// The reference the days were compared against:
    /// (income - savings target) / days in month
    pub reference_daily_budget: f64,
}
