use crate::models::month::MonthPoint;
use crate::models::source::{Consistency, IncomeSource};

/// Minimum number of observations a Variable source needs before a trend
/// is fitted. Below this the declared monthly amount is used as-is;
/// sparse history must never be extrapolated.
pub const MIN_OBSERVATIONS_FOR_TREND: usize = 3;

/// The forecasting model selected for one source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForecastModel {
    /// Every month predicts the same amount
    Constant(f64),
    /// Least-squares line over (month offset, amount) pairs
    Trend { slope: f64, intercept: f64 },
}

impl ForecastModel {
    /// Predicted amount at a month offset, floored at zero. Income cannot
    /// go negative however steep a downward trend is.
    #[must_use]
    pub fn predict(&self, offset: i32) -> f64 {
        let raw = match self {
            ForecastModel::Constant(amount) => *amount,
            ForecastModel::Trend { slope, intercept } => slope * f64::from(offset) + intercept,
        };
        raw.max(0.0)
    }
}

/// Chooses and evaluates the forecasting model for income sources.
///
/// Pure computation; no I/O. Model selection lives in one policy function
/// so it can be tested without any chart involved.
pub struct ForecastService;

impl ForecastService {
    pub fn new() -> Self {
        Self
    }

    /// The model-selection policy:
    /// - A Fixed source, or a Variable source with fewer than
    ///   `MIN_OBSERVATIONS_FOR_TREND` observations, gets a constant model
    ///   at its declared monthly amount.
    /// - A Variable source with enough history gets a least-squares trend
    ///   over its chronologically ordered observations.
    /// - A degenerate fit falls back to a constant model at the observed
    ///   mean.
    #[must_use]
    pub fn select_model(&self, source: &IncomeSource) -> ForecastModel {
        if source.consistency == Consistency::Fixed
            || source.history.len() < MIN_OBSERVATIONS_FOR_TREND
        {
            return ForecastModel::Constant(source.monthly_amount);
        }

        // BTreeMap iteration is already chronological (ascending offset).
        let points: Vec<(f64, f64)> = source
            .history
            .iter()
            .map(|(&offset, &amount)| (f64::from(offset), amount))
            .collect();

        match Self::fit_line(&points) {
            Some((slope, intercept)) => ForecastModel::Trend { slope, intercept },
            None => {
                let mean = points.iter().map(|(_, y)| y).sum::<f64>() / points.len() as f64;
                ForecastModel::Constant(mean)
            }
        }
    }

    /// Forecast one source across the axis. A month with a recorded
    /// observation returns the observed value (history shows ground truth,
    /// never the fitted line); every other month evaluates the model.
    #[must_use]
    pub fn forecast(&self, source: &IncomeSource, axis: &[MonthPoint]) -> Vec<f64> {
        let model = self.select_model(source);
        axis.iter()
            .map(|point| match source.history.get(&point.offset) {
                Some(&observed) => observed,
                None => model.predict(point.offset),
            })
            .collect()
    }

    /// Ordinary least squares over (x, y) pairs. Returns None when the fit
    /// is degenerate: fewer than 2 points, zero x-variance, or a
    /// non-finite result.
    fn fit_line(points: &[(f64, f64)]) -> Option<(f64, f64)> {
        if points.len() < 2 {
            return None;
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut ss_xx = 0.0;
        let mut ss_xy = 0.0;
        for (x, y) in points {
            ss_xx += (x - mean_x) * (x - mean_x);
            ss_xy += (x - mean_x) * (y - mean_y);
        }

        if ss_xx <= f64::EPSILON {
            return None;
        }

        let slope = ss_xy / ss_xx;
        let intercept = mean_y - slope * mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return None;
        }

        Some((slope, intercept))
    }
}

impl Default for ForecastService {
    fn default() -> Self {
        Self::new()
    }
}
