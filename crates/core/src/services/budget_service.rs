use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeMap;

use crate::models::budget::{BudgetInputs, BudgetSnapshot, SavingsStatus, SpendingPattern};
use crate::models::plan::Plan;

/// Raw savings targets below this value are read as a percentage of
/// income, anything at or above it as an absolute amount. A flat target
/// under 100 currency units is therefore misread as a percentage; an
/// explicit unit flag would remove the ambiguity, but the convention is
/// kept for parity with existing stored targets.
const PERCENT_TARGET_THRESHOLD: f64 = 100.0;

/// Days per week, for the weekly allowance.
const DAYS_PER_WEEK: f64 = 7.0;

/// Turns monthly income, expenses, and spend into a day-level adaptive
/// allowance and a month-end savings projection.
///
/// Every ratio with a possibly-zero denominator short-circuits to 0; the
/// calculator always returns a plausible snapshot and never panics.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Assemble this month's budget inputs from the plan: total income
    /// across sources, planned expenses, the raw savings target, and spend
    /// recorded between the 1st and `today` inclusive.
    #[must_use]
    pub fn inputs_for_month(&self, plan: &Plan, today: NaiveDate) -> BudgetInputs {
        let monthly_income: f64 = plan.sources.iter().map(|s| s.monthly_amount).sum();
        let planned_expenses: f64 = plan.expenses.iter().map(|e| e.amount).sum();

        let start_of_month = today.with_day(1).unwrap_or(today);
        let spent_to_date: f64 = plan
            .transactions
            .iter()
            .filter(|t| t.date >= start_of_month && t.date <= today)
            .map(|t| t.amount)
            .sum();

        BudgetInputs {
            monthly_income,
            planned_expenses,
            savings_target: plan.savings_target,
            spent_to_date,
            days_in_month: days_in_month(today),
            current_day: today.day(),
        }
    }

    /// Compute the adaptive budget snapshot.
    ///
    /// The base daily budget spreads income evenly across the month. The
    /// gap between expected linear spend and actual spend to date is then
    /// redistributed evenly over the remaining days (today included),
    /// raising or lowering the allowance for the rest of the month.
    #[must_use]
    pub fn snapshot(&self, inputs: &BudgetInputs) -> BudgetSnapshot {
        // Today counts as remaining. Floored at 1 even on malformed input
        // so the redistribution below cannot divide by zero.
        let days_remaining =
            (i64::from(inputs.days_in_month) - i64::from(inputs.current_day) + 1).max(1) as u32;

        let base_daily_budget = if inputs.days_in_month > 0 {
            inputs.monthly_income / f64::from(inputs.days_in_month)
        } else {
            0.0
        };

        let elapsed_days = inputs.current_day.saturating_sub(1);
        let expected_spend_to_date = base_daily_budget * f64::from(elapsed_days);
        let saved_to_date = expected_spend_to_date - inputs.spent_to_date;

        let adjustment_per_day = saved_to_date / f64::from(days_remaining);
        let adjusted_daily_budget = base_daily_budget + adjustment_per_day;

        // Only a surplus counts toward savings; a deficit is absorbed by
        // the reduced daily budget instead of going negative here.
        let current_savings = saved_to_date.max(0.0);

        let savings_target_amount =
            Self::resolve_savings_target(inputs.monthly_income, inputs.savings_target);

        let projected_month_end_savings =
            current_savings + adjustment_per_day * f64::from(days_remaining);

        let savings_target_status = if projected_month_end_savings >= savings_target_amount {
            SavingsStatus::OnTrack
        } else {
            SavingsStatus::Behind
        };

        let savings_progress_pct = if savings_target_amount > 0.0 {
            current_savings / savings_target_amount * 100.0
        } else {
            0.0
        };

        let expense_pct_of_income = if inputs.monthly_income > 0.0 {
            inputs.planned_expenses / inputs.monthly_income * 100.0
        } else {
            0.0
        };

        let spent_pct_of_income = if inputs.monthly_income > 0.0 {
            inputs.spent_to_date / inputs.monthly_income * 100.0
        } else {
            0.0
        };

        BudgetSnapshot {
            base_daily_budget,
            adjusted_daily_budget,
            adjusted_weekly_budget: adjusted_daily_budget * DAYS_PER_WEEK,
            days_remaining,
            expected_spend_to_date,
            actual_spend_to_date: inputs.spent_to_date,
            saved_to_date,
            current_savings,
            savings_target_amount,
            projected_month_end_savings,
            savings_target_status,
            savings_progress_pct,
            expense_pct_of_income,
            spent_pct_of_income,
        }
    }

    /// Resolve the raw savings target to an absolute monthly amount.
    /// Values below 100 are a percentage of income, the rest are absolute.
    #[must_use]
    pub fn resolve_savings_target(monthly_income: f64, raw_target: f64) -> f64 {
        if raw_target < PERCENT_TARGET_THRESHOLD {
            monthly_income * raw_target / 100.0
        } else {
            raw_target
        }
    }

    /// Count days this month whose recorded spend stayed under or went
    /// over a plain reference budget of (income - savings target) / days
    /// in month. Days with no transactions count as neither.
    #[must_use]
    pub fn spending_pattern(&self, plan: &Plan, today: NaiveDate) -> SpendingPattern {
        let monthly_income: f64 = plan.sources.iter().map(|s| s.monthly_amount).sum();
        let savings_target = Self::resolve_savings_target(monthly_income, plan.savings_target);

        let days = f64::from(days_in_month(today));
        let reference_daily_budget = if days > 0.0 {
            (monthly_income - savings_target) / days
        } else {
            0.0
        };

        let start_of_month = today.with_day(1).unwrap_or(today);
        let mut daily_totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for transaction in &plan.transactions {
            if transaction.date >= start_of_month && transaction.date <= today {
                *daily_totals.entry(transaction.date).or_insert(0.0) += transaction.amount;
            }
        }

        let days_under_budget = daily_totals
            .values()
            .filter(|&&total| total <= reference_daily_budget)
            .count();
        let days_over_budget = daily_totals.len() - days_under_budget;

        SpendingPattern {
            days_under_budget,
            days_over_budget,
            reference_daily_budget,
        }
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of days in `date`'s month, via the first of the next month.
fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    match first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
    {
        Some(last) => last.day(),
        None => 30,
    }
}
