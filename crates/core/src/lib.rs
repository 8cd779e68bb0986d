pub mod errors;
pub mod models;
pub mod services;

use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use models::{
    analysis::{IncomeSimulation, SeasonalityProfile, SimulationConfig, SourceImpact},
    budget::{BudgetInputs, BudgetSnapshot, SpendingPattern},
    forecast::IncomeProjection,
    month::MonthPoint,
    observation::HistoricalObservation,
    plan::Plan,
    source::{Consistency, Frequency, IncomeCategory, IncomeSource},
    transaction::{PlannedExpense, Transaction},
};
use services::{
    analysis_service::AnalysisService,
    budget_service::BudgetService,
    forecast_service::{ForecastModel, ForecastService},
    plan_service::PlanService,
    projection_service::ProjectionService,
};

use errors::CoreError;

/// Default number of past months on the forecast axis.
pub const DEFAULT_MONTHS_BACK: u32 = 12;

/// Default number of forward months on the forecast axis, the current
/// month included.
pub const DEFAULT_MONTHS_FORWARD: u32 = 12;

/// Main entry point for the Income Planner core library.
/// Holds the plan state and all services needed to operate on it.
#[must_use]
pub struct IncomePlanner {
    plan: Plan,
    plan_service: PlanService,
    forecast_service: ForecastService,
    projection_service: ProjectionService,
    budget_service: BudgetService,
    analysis_service: AnalysisService,
    /// Tracks whether any mutation has occurred since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for IncomePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomePlanner")
            .field("sources", &self.plan.sources.len())
            .field("expenses", &self.plan.expenses.len())
            .field("transactions", &self.plan.transactions.len())
            .field("savings_target", &self.plan.savings_target)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl IncomePlanner {
    /// Create a brand new empty plan.
    pub fn create_new() -> Self {
        Self::build(Plan::default())
    }

    /// Restore a planner from a previously exported JSON plan. The
    /// surrounding application owns actual persistence; this is the
    /// in-process end of that contract.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let plan: Plan = serde_json::from_str(json)?;
        Ok(Self::build(plan))
    }

    /// Export the full plan as a JSON string for the surrounding
    /// application to persist.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.plan)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize plan: {e}")))
    }

    // ── Income Sources ──────────────────────────────────────────────

    /// Add an income source. The amount is per `frequency` pay period and
    /// is normalized to a monthly equivalent. Returns the new source's id.
    pub fn add_income_source(
        &mut self,
        name: impl Into<String>,
        category: IncomeCategory,
        frequency: Frequency,
        consistency: Consistency,
        amount: f64,
    ) -> Result<Uuid, CoreError> {
        let source = IncomeSource::new(name, category, frequency, consistency, amount);
        let id = source.id;
        self.plan_service.add_source(&mut self.plan, source)?;
        self.dirty = true;
        Ok(id)
    }

    /// Update an existing source by id. Recorded history is kept.
    pub fn update_income_source(
        &mut self,
        source_id: Uuid,
        name: impl Into<String>,
        category: IncomeCategory,
        frequency: Frequency,
        consistency: Consistency,
        amount: f64,
    ) -> Result<(), CoreError> {
        self.plan_service.update_source(
            &mut self.plan,
            source_id,
            name,
            category,
            frequency,
            consistency,
            amount,
        )?;
        self.dirty = true;
        Ok(())
    }

    /// Remove a source by id. Its recorded history goes with it.
    pub fn remove_income_source(&mut self, source_id: Uuid) -> Result<(), CoreError> {
        self.plan_service.remove_source(&mut self.plan, source_id)?;
        self.dirty = true;
        Ok(())
    }

    /// Get a single source by id.
    #[must_use]
    pub fn get_income_source(&self, source_id: Uuid) -> Option<&IncomeSource> {
        self.plan.sources.iter().find(|s| s.id == source_id)
    }

    /// All income sources, in insertion order.
    #[must_use]
    pub fn get_income_sources(&self) -> &[IncomeSource] {
        &self.plan.sources
    }

    /// Number of income sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.plan.sources.len()
    }

    /// Sum of all sources' monthly-equivalent amounts.
    #[must_use]
    pub fn total_monthly_income(&self) -> f64 {
        self.plan_service.total_monthly_income(&self.plan)
    }

    // ── Historical Observations ─────────────────────────────────────

    /// Record observed amounts for a source. A month written twice keeps
    /// the last value; offsets must lie within the default historical
    /// window. A Variable source's monthly amount becomes the mean of its
    /// history afterwards.
    pub fn record_history(
        &mut self,
        source_id: Uuid,
        observations: &[HistoricalObservation],
    ) -> Result<(), CoreError> {
        self.plan_service.record_history(
            &mut self.plan,
            source_id,
            observations,
            DEFAULT_MONTHS_BACK,
        )?;
        self.dirty = true;
        Ok(())
    }

    /// The recorded observations for a source. Only months with explicit
    /// data appear; a missing month means "no data", never "zero income".
    pub fn get_observations(&self, source_id: Uuid) -> Result<&BTreeMap<i32, f64>, CoreError> {
        self.plan_service.observations_for(&self.plan, source_id)
    }

    // ── Forecasting ─────────────────────────────────────────────────

    /// The month axis around an explicit `today`.
    #[must_use]
    pub fn month_axis(today: NaiveDate, months_back: u32, months_forward: u32) -> Vec<MonthPoint> {
        MonthPoint::axis(today, months_back, months_forward)
    }

    /// The forecasting model the policy selects for one source.
    pub fn forecast_model(&self, source_id: Uuid) -> Result<ForecastModel, CoreError> {
        let source = self.plan_service.get_source(&self.plan, source_id)?;
        Ok(self.forecast_service.select_model(source))
    }

    /// Project all sources over an explicit window around `today`.
    #[must_use]
    pub fn project_income(
        &self,
        today: NaiveDate,
        months_back: u32,
        months_forward: u32,
    ) -> IncomeProjection {
        self.projection_service
            .project(&self.plan, today, months_back, months_forward)
    }

    /// Project over the default 12-back/12-forward window as of today.
    #[must_use]
    pub fn project_income_now(&self) -> IncomeProjection {
        self.project_income(
            Utc::now().date_naive(),
            DEFAULT_MONTHS_BACK,
            DEFAULT_MONTHS_FORWARD,
        )
    }

    // ── Savings Target & Expenses ───────────────────────────────────

    /// Set the monthly savings target. The raw value is stored as entered;
    /// values below 100 are read as a percentage of income at budget time.
    pub fn set_savings_target(&mut self, target: f64) -> Result<(), CoreError> {
        self.plan_service.set_savings_target(&mut self.plan, target)?;
        self.dirty = true;
        Ok(())
    }

    /// The raw savings target as entered.
    #[must_use]
    pub fn savings_target(&self) -> f64 {
        self.plan.savings_target
    }

    /// Add a planned monthly expense. Returns the new expense's id.
    pub fn add_planned_expense(
        &mut self,
        name: impl Into<String>,
        amount: f64,
    ) -> Result<Uuid, CoreError> {
        let expense = PlannedExpense::new(name, amount);
        let id = expense.id;
        self.plan_service.add_expense(&mut self.plan, expense)?;
        self.dirty = true;
        Ok(id)
    }

    /// Update a planned expense by id.
    pub fn update_planned_expense(
        &mut self,
        expense_id: Uuid,
        name: impl Into<String>,
        amount: f64,
    ) -> Result<(), CoreError> {
        self.plan_service
            .update_expense(&mut self.plan, expense_id, name, amount)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove a planned expense by id.
    pub fn remove_planned_expense(&mut self, expense_id: Uuid) -> Result<(), CoreError> {
        self.plan_service.remove_expense(&mut self.plan, expense_id)?;
        self.dirty = true;
        Ok(())
    }

    /// All planned expenses, in insertion order.
    #[must_use]
    pub fn get_planned_expenses(&self) -> &[PlannedExpense] {
        &self.plan.expenses
    }

    /// Sum of all planned monthly expenses.
    #[must_use]
    pub fn total_planned_expenses(&self) -> f64 {
        self.plan_service.total_planned_expenses(&self.plan)
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a transaction (actual spend). Returns the new transaction's
    /// id.
    pub fn add_transaction(
        &mut self,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        let transaction = Transaction::new(amount, category, date);
        let id = transaction.id;
        self.plan_service.add_transaction(&mut self.plan, transaction)?;
        self.dirty = true;
        Ok(id)
    }

    /// Remove a transaction by id.
    pub fn remove_transaction(&mut self, transaction_id: Uuid) -> Result<(), CoreError> {
        self.plan_service
            .remove_transaction(&mut self.plan, transaction_id)?;
        self.dirty = true;
        Ok(())
    }

    /// All transactions, ordered by date.
    #[must_use]
    pub fn get_transactions(&self) -> &[Transaction] {
        &self.plan.transactions
    }

    /// Transactions within a date range (inclusive on both ends).
    #[must_use]
    pub fn get_transactions_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Transaction> {
        self.plan
            .transactions
            .iter()
            .filter(|t| t.date >= from && t.date <= to)
            .collect()
    }

    // ── Budget ──────────────────────────────────────────────────────

    /// The adaptive budget snapshot for the month containing `today`.
    #[must_use]
    pub fn budget_snapshot(&self, today: NaiveDate) -> BudgetSnapshot {
        let inputs = self.budget_service.inputs_for_month(&self.plan, today);
        self.budget_service.snapshot(&inputs)
    }

    /// The adaptive budget snapshot as of today.
    #[must_use]
    pub fn budget_snapshot_now(&self) -> BudgetSnapshot {
        self.budget_snapshot(Utc::now().date_naive())
    }

    /// Compute a snapshot from explicit inputs, with no plan state
    /// involved.
    #[must_use]
    pub fn budget_snapshot_from_inputs(&self, inputs: &BudgetInputs) -> BudgetSnapshot {
        self.budget_service.snapshot(inputs)
    }

    /// Days under and over the reference daily budget so far this month.
    #[must_use]
    pub fn spending_pattern(&self, today: NaiveDate) -> SpendingPattern {
        self.budget_service.spending_pattern(&self.plan, today)
    }

    /// The spending pattern as of today.
    #[must_use]
    pub fn spending_pattern_now(&self) -> SpendingPattern {
        self.spending_pattern(Utc::now().date_naive())
    }

    // ── Analysis ────────────────────────────────────────────────────

    /// What losing one source would do to total monthly income.
    pub fn source_impact(&self, source_id: Uuid) -> Result<SourceImpact, CoreError> {
        self.analysis_service.source_impact(&self.plan, source_id)
    }

    /// Monte Carlo projection of one source's income. Deterministic when
    /// the config carries a seed.
    pub fn simulate_source_income(
        &self,
        source_id: Uuid,
        config: &SimulationConfig,
    ) -> Result<IncomeSimulation, CoreError> {
        self.analysis_service
            .simulate_source_income(&self.plan, source_id, config)
    }

    /// A source's observed income grouped by calendar month.
    pub fn seasonality_profile(
        &self,
        source_id: Uuid,
        today: NaiveDate,
    ) -> Result<SeasonalityProfile, CoreError> {
        self.analysis_service
            .seasonality_profile(&self.plan, source_id, today)
    }

    // ── Convenience Helpers ─────────────────────────────────────────

    /// Monthly income left after planned expenses.
    #[must_use]
    pub fn monthly_net_income(&self) -> f64 {
        self.total_monthly_income() - self.total_planned_expenses()
    }

    /// Monthly income grouped by category, largest first.
    #[must_use]
    pub fn income_by_category(&self) -> Vec<(IncomeCategory, f64)> {
        let mut totals: BTreeMap<String, (IncomeCategory, f64)> = BTreeMap::new();
        for source in &self.plan.sources {
            let entry = totals
                .entry(source.category.to_string())
                .or_insert((source.category, 0.0));
            entry.1 += source.monthly_amount;
        }

        let mut by_category: Vec<(IncomeCategory, f64)> = totals.into_values().collect();
        by_category.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        by_category
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export all income sources (history included) as a JSON string.
    pub fn export_sources_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.plan.sources)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize sources: {e}")))
    }

    /// Import income sources from a JSON string. Each source is validated;
    /// if any fails, none are imported. Returns the number imported.
    pub fn import_sources_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let sources: Vec<IncomeSource> = serde_json::from_str(json)?;
        let count = sources.len();

        let mut temp_plan = self.plan.clone();
        for source in sources {
            self.plan_service.add_source(&mut temp_plan, source)?;
        }

        self.plan = temp_plan;
        self.dirty = true;
        Ok(count)
    }

    /// Read-only access to the whole plan.
    #[must_use]
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    // ── Dirty State ─────────────────────────────────────────────────

    /// Returns `true` if the plan has been modified since creation, load,
    /// or the last `mark_saved` call.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Clear the unsaved-changes flag. Called by the surrounding
    /// application after it has persisted the exported plan.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(plan: Plan) -> Self {
        Self {
            plan,
            plan_service: PlanService::new(),
            forecast_service: ForecastService::new(),
            projection_service: ProjectionService::new(),
            budget_service: BudgetService::new(),
            analysis_service: AnalysisService::new(),
            dirty: false,
        }
    }
}
