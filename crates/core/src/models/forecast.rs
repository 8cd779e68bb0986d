use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Series key used for the aggregate line in flattened chart output.
pub const TOTAL_SERIES: &str = "TOTAL";

/// One month's value for one series, in flattened chart-friendly form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Month label, e.g. "Mar 2025"
    pub label: String,

    /// Predicted or observed amount (never negative)
    pub amount: f64,

    /// Source id as a string, or `TOTAL_SERIES` for the aggregate
    pub series: String,
}

/// Forecast values for one income source across the month axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSeries {
    /// The source this series belongs to
    pub source_id: Uuid,

    /// Source display name, for chart legends
    pub name: String,

    /// One value per axis month, aligned with the projection labels
    pub values: Vec<f64>,
}

/// Aligned multi-series forecast output, ready to plot as a multi-line
/// chart with a vertical "today" divider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeProjection {
    /// Month labels for the x-axis
    pub labels: Vec<String>,

    /// Index of the current month on the axis. Everything before it is
    /// historical, everything from it onward is forecast.
    pub today_index: usize,

    /// One series per income source, in plan order
    pub sources: Vec<SourceSeries>,

    /// Sum of all source series, same length as `labels`
    pub total: Vec<f64>,
}

impl IncomeProjection {
    /// Number of months on the axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The series for a specific source, if present.
    #[must_use]
    pub fn series_for(&self, source_id: Uuid) -> Option<&SourceSeries> {
        self.sources.iter().find(|s| s.source_id == source_id)
    }

    /// Flatten per-source series plus the total into chart points, one per
    /// (series, month) pair.
    #[must_use]
    pub fn points(&self) -> Vec<ForecastPoint> {
        let mut points = Vec::with_capacity((self.sources.len() + 1) * self.labels.len());
        for series in &self.sources {
            for (label, &amount) in self.labels.iter().zip(&series.values) {
                points.push(ForecastPoint {
                    label: label.clone(),
                    amount,
                    series: series.source_id.to_string(),
                });
            }
        }
        for (label, &amount) in self.labels.iter().zip(&self.total) {
            points.push(ForecastPoint {
                label: label.clone(),
                amount,
                series: TOTAL_SERIES.to_string(),
            });
        }
        points
    }
}
