use chrono::NaiveDate;

use crate::models::forecast::{IncomeProjection, SourceSeries};
use crate::models::month::MonthPoint;
use crate::models::plan::Plan;
use crate::services::forecast_service::ForecastService;

/// Combines per-source forecasts into one aligned multi-series projection.
pub struct ProjectionService {
    forecast_service: ForecastService,
}

impl ProjectionService {
    pub fn new() -> Self {
        Self {
            forecast_service: ForecastService::new(),
        }
    }

    /// Project all sources over `months_back` past and `months_forward`
    /// future months around `today`.
    ///
    /// The total at every index is the exact sum of the source values at
    /// that index; rounding is left to the presentation layer. With no
    /// sources the total is a zero series of full axis length, so charts
    /// degrade gracefully instead of collapsing.
    #[must_use]
    pub fn project(
        &self,
        plan: &Plan,
        today: NaiveDate,
        months_back: u32,
        months_forward: u32,
    ) -> IncomeProjection {
        let axis = MonthPoint::axis(today, months_back, months_forward);
        let labels: Vec<String> = axis.iter().map(|p| p.label.clone()).collect();
        let mut total = vec![0.0; axis.len()];

        let mut sources = Vec::with_capacity(plan.sources.len());
        for source in &plan.sources {
            let values = self.forecast_service.forecast(source, &axis);
            for (slot, value) in total.iter_mut().zip(&values) {
                *slot += value;
            }
            sources.push(SourceSeries {
                source_id: source.id,
                name: source.name.clone(),
                values,
            });
        }

        IncomeProjection {
            labels,
            today_index: months_back as usize,
            sources,
            total,
        }
    }
}

impl Default for ProjectionService {
    fn default() -> Self {
        Self::new()
    }
}
