use chrono::{Datelike, Months, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::f64::consts::PI;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::analysis::{
    IncomeSimulation, MonthlyAverage, SeasonalityProfile, SimulationConfig, SourceImpact,
};
use crate::models::plan::Plan;
use crate::services::plan_service::PlanService;

/// Hard cap on Monte Carlo runs. Keeps a single simulation call bounded
/// no matter what the caller asks for.
pub const MAX_SIMULATION_RUNS: usize = 200;

/// Observations needed before growth statistics are derived from history.
const MIN_OBSERVATIONS_FOR_STATS: usize = 3;

/// Fallback mean month-over-month growth for sparse history (1%).
const DEFAULT_GROWTH_MEAN: f64 = 0.01;

/// Fallback growth standard deviation for sparse history (3%).
const DEFAULT_GROWTH_STD_DEV: f64 = 0.03;

/// What-if, simulation, and seasonality analyses over income sources.
///
/// Pure computation; the only nondeterminism is the simulation RNG, which
/// is seedable for reproducible output.
pub struct AnalysisService {
    plan_service: PlanService,
}

impl AnalysisService {
    pub fn new() -> Self {
        Self {
            plan_service: PlanService::new(),
        }
    }

    // ── Source Impact ───────────────────────────────────────────────

    /// What losing `source_id` would do to total monthly income.
    pub fn source_impact(&self, plan: &Plan, source_id: Uuid) -> Result<SourceImpact, CoreError> {
        let source = self.plan_service.get_source(plan, source_id)?;
        let total_income = self.plan_service.total_monthly_income(plan);

        let share_pct = if total_income > 0.0 {
            source.monthly_amount / total_income * 100.0
        } else {
            0.0
        };

        Ok(SourceImpact {
            source_id,
            name: source.name.clone(),
            monthly_amount: source.monthly_amount,
            total_income,
            remaining_income: total_income - source.monthly_amount,
            share_pct,
        })
    }

    // ── Monte Carlo Simulation ──────────────────────────────────────

    /// Monte Carlo projection of one source's income.
    ///
    /// Growth statistics (mean and standard deviation of month-over-month
    /// percentage change) come from the source's chronological history
    /// when it has at least 3 observations yielding 2 finite changes, and
    /// each path then starts at the last observed value. Sparser history
    /// falls back to 1% mean and 3% standard deviation, starting from the
    /// declared monthly amount. Every run compounds normally distributed
    /// growth month by month; the output is the per-month median across
    /// runs.
    pub fn simulate_source_income(
        &self,
        plan: &Plan,
        source_id: Uuid,
        config: &SimulationConfig,
    ) -> Result<IncomeSimulation, CoreError> {
        let source = self.plan_service.get_source(plan, source_id)?;

        let values: Vec<f64> = source.history.values().copied().collect();
        let (growth_mean, growth_std_dev, start_value) = match Self::growth_stats(&values) {
            Some((mean, std_dev)) => {
                let start = values.last().copied().unwrap_or(source.monthly_amount);
                (mean, std_dev, start)
            }
            None => (
                DEFAULT_GROWTH_MEAN,
                DEFAULT_GROWTH_STD_DEV,
                source.monthly_amount,
            ),
        };

        let months = config.months.max(1);
        let runs = config.runs.clamp(1, MAX_SIMULATION_RUNS);

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut paths: Vec<Vec<f64>> = Vec::with_capacity(runs);
        for _ in 0..runs {
            let mut path = Vec::with_capacity(months);
            let mut value = start_value;
            path.push(value);
            for _ in 1..months {
                let growth = growth_mean + growth_std_dev * standard_normal(&mut rng);
                value *= 1.0 + growth;
                path.push(value);
            }
            paths.push(path);
        }

        let mut median = Vec::with_capacity(months);
        for month in 0..months {
            let mut column: Vec<f64> = paths.iter().map(|p| p[month]).collect();
            median.push(median_of(&mut column));
        }

        Ok(IncomeSimulation {
            median,
            months,
            runs,
        })
    }

    // ── Seasonality ─────────────────────────────────────────────────

    /// A source's observed income grouped by calendar month. Offsets are
    /// resolved against `today`; months without an observation are
    /// omitted.
    pub fn seasonality_profile(
        &self,
        plan: &Plan,
        source_id: Uuid,
        today: NaiveDate,
    ) -> Result<SeasonalityProfile, CoreError> {
        let source = self.plan_service.get_source(plan, source_id)?;
        let anchor = today.with_day(1).unwrap_or(today);

        // Calendar month number -> (sum, count)
        let mut buckets: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        for (&offset, &amount) in &source.history {
            let date = if offset >= 0 {
                anchor.checked_add_months(Months::new(offset as u32))
            } else {
                anchor.checked_sub_months(Months::new(offset.unsigned_abs()))
            }
            .unwrap_or(anchor);

            let entry = buckets.entry(date.month()).or_insert((0.0, 0));
            entry.0 += amount;
            entry.1 += 1;
        }

        let months: Vec<MonthlyAverage> = buckets
            .iter()
            .map(|(&month, &(sum, count))| MonthlyAverage {
                month,
                label: NaiveDate::from_ymd_opt(2000, month, 1)
                    .map(|d| d.format("%b").to_string())
                    .unwrap_or_else(|| month.to_string()),
                mean: sum / count as f64,
            })
            .collect();

        let overall_mean = if months.is_empty() {
            0.0
        } else {
            months.iter().map(|m| m.mean).sum::<f64>() / months.len() as f64
        };

        Ok(SeasonalityProfile {
            months,
            overall_mean,
        })
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Mean and sample standard deviation of month-over-month percentage
    /// change. Returns None when history is too sparse to say anything
    /// (fewer than 3 observations or fewer than 2 finite changes).
    fn growth_stats(values: &[f64]) -> Option<(f64, f64)> {
        if values.len() < MIN_OBSERVATIONS_FOR_STATS {
            return None;
        }

        let changes: Vec<f64> = values
            .windows(2)
            .filter(|w| w[0] != 0.0)
            .map(|w| (w[1] - w[0]) / w[0])
            .filter(|c| c.is_finite())
            .collect();
        if changes.len() < 2 {
            return None;
        }

        let n = changes.len() as f64;
        let mean = changes.iter().sum::<f64>() / n;
        let variance = changes.iter().map(|c| (c - mean) * (c - mean)).sum::<f64>() / (n - 1.0);
        Some((mean, variance.sqrt()))
    }
}

impl Default for AnalysisService {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard normal sample via the Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-12);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Median by sorting; averages the middle pair for an even count.
fn median_of(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
