use std::collections::BTreeMap;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::observation::HistoricalObservation;
use crate::models::plan::Plan;
use crate::models::source::{Consistency, Frequency, IncomeCategory, IncomeSource};
use crate::models::transaction::{PlannedExpense, Transaction};

/// Manages the plan's income sources, history, planned expenses, and
/// transactions.
///
/// Pure business logic; no I/O. The plan is passed in explicitly so the
/// service itself stays stateless.
pub struct PlanService;

impl PlanService {
    pub fn new() -> Self {
        Self
    }

    // ── Income Sources ──────────────────────────────────────────────

    /// Add a new income source. Validates before adding.
    pub fn add_source(&self, plan: &mut Plan, source: IncomeSource) -> Result<(), CoreError> {
        Self::validate_source(&source.name, source.monthly_amount)?;
        plan.sources.push(source);
        Ok(())
    }

    /// Update an existing source in place. The entered `amount` is per
    /// `frequency` pay period and becomes the new declared monthly
    /// equivalent; recorded history is kept, and a Variable source's
    /// amount is re-derived from that history the next time it changes.
    pub fn update_source(
        &self,
        plan: &mut Plan,
        source_id: Uuid,
        name: impl Into<String>,
        category: IncomeCategory,
        frequency: Frequency,
        consistency: Consistency,
        amount: f64,
    ) -> Result<(), CoreError> {
        let name = name.into();
        let monthly_amount = frequency.to_monthly(amount);
        Self::validate_source(&name, monthly_amount)?;

        let source = Self::get_source_mut(plan, source_id)?;
        source.name = name;
        source.category = category;
        source.frequency = frequency;
        source.consistency = consistency;
        source.monthly_amount = monthly_amount;
        Ok(())
    }

    /// Remove a source by id. Its recorded history goes with it.
    pub fn remove_source(
        &self,
        plan: &mut Plan,
        source_id: Uuid,
    ) -> Result<IncomeSource, CoreError> {
        let idx = plan
            .sources
            .iter()
            .position(|s| s.id == source_id)
            .ok_or_else(|| CoreError::SourceNotFound(source_id.to_string()))?;
        Ok(plan.sources.remove(idx))
    }

    /// Get a source by id.
    pub fn get_source<'a>(
        &self,
        plan: &'a Plan,
        source_id: Uuid,
    ) -> Result<&'a IncomeSource, CoreError> {
        plan.sources
            .iter()
            .find(|s| s.id == source_id)
            .ok_or_else(|| CoreError::SourceNotFound(source_id.to_string()))
    }

    /// Sum of all sources' monthly-equivalent amounts.
    #[must_use]
    pub fn total_monthly_income(&self, plan: &Plan) -> f64 {
        plan.sources.iter().map(|s| s.monthly_amount).sum()
    }

    // ── Historical Observations ─────────────────────────────────────

    /// The recorded observations for a source. Only months with explicit
    /// data appear; a missing month means "no data", never "zero income".
    pub fn observations_for<'a>(
        &self,
        plan: &'a Plan,
        source_id: Uuid,
    ) -> Result<&'a BTreeMap<i32, f64>, CoreError> {
        Ok(&self.get_source(plan, source_id)?.history)
    }

    /// Record observations for a source. All offsets are validated against
    /// the historical window `-(months_back) ..= 0` before anything is
    /// written; a month that already holds a value is overwritten.
    ///
    /// After the write, a Variable source's monthly amount becomes the
    /// mean of all its observations. Fixed sources keep their declared
    /// amount.
    pub fn record_history(
        &self,
        plan: &mut Plan,
        source_id: Uuid,
        observations: &[HistoricalObservation],
        months_back: u32,
    ) -> Result<(), CoreError> {
        let earliest = -(months_back as i32);
        for obs in observations {
            if obs.offset < earliest || obs.offset > 0 {
                return Err(CoreError::ValidationError(format!(
                    "Observation offset {} is outside the historical window {}..=0",
                    obs.offset, earliest
                )));
            }
        }

        let source = Self::get_source_mut(plan, source_id)?;
        for obs in observations {
            source.history.insert(obs.offset, obs.amount);
        }

        if source.consistency == Consistency::Variable {
            if let Some(mean) = source.observed_mean() {
                source.monthly_amount = mean;
            }
        }

        Ok(())
    }

    // ── Planned Expenses ────────────────────────────────────────────

    /// Add a planned monthly expense. Validates before adding.
    pub fn add_expense(&self, plan: &mut Plan, expense: PlannedExpense) -> Result<(), CoreError> {
        Self::validate_expense(&expense.name, expense.amount)?;
        plan.expenses.push(expense);
        Ok(())
    }

    /// Update a planned expense in place.
    pub fn update_expense(
        &self,
        plan: &mut Plan,
        expense_id: Uuid,
        name: impl Into<String>,
        amount: f64,
    ) -> Result<(), CoreError> {
        let name = name.into();
        Self::validate_expense(&name, amount)?;

        let expense = plan
            .expenses
            .iter_mut()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| CoreError::ExpenseNotFound(expense_id.to_string()))?;
        expense.name = name;
        expense.amount = amount;
        Ok(())
    }

    /// Remove a planned expense by id.
    pub fn remove_expense(
        &self,
        plan: &mut Plan,
        expense_id: Uuid,
    ) -> Result<PlannedExpense, CoreError> {
        let idx = plan
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| CoreError::ExpenseNotFound(expense_id.to_string()))?;
        Ok(plan.expenses.remove(idx))
    }

    /// Sum of all planned monthly expenses.
    #[must_use]
    pub fn total_planned_expenses(&self, plan: &Plan) -> f64 {
        plan.expenses.iter().map(|e| e.amount).sum()
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a transaction. Validates before adding.
    pub fn add_transaction(
        &self,
        plan: &mut Plan,
        transaction: Transaction,
    ) -> Result<(), CoreError> {
        if !transaction.amount.is_finite() || transaction.amount < 0.0 {
            return Err(CoreError::ValidationError(
                "Transaction amount must be a non-negative number".into(),
            ));
        }
        // Binary insert keeps the list date-sorted, so month filters scan
        // a contiguous run.
        let pos = plan
            .transactions
            .binary_search_by_key(&transaction.date, |t| t.date)
            .unwrap_or_else(|pos| pos);
        plan.transactions.insert(pos, transaction);
        Ok(())
    }

    /// Remove a transaction by id.
    pub fn remove_transaction(
        &self,
        plan: &mut Plan,
        transaction_id: Uuid,
    ) -> Result<Transaction, CoreError> {
        let idx = plan
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        Ok(plan.transactions.remove(idx))
    }

    // ── Savings Target ──────────────────────────────────────────────

    /// Set the monthly savings target. The raw value is stored as entered;
    /// percent-versus-absolute is resolved at budget time.
    pub fn set_savings_target(&self, plan: &mut Plan, target: f64) -> Result<(), CoreError> {
        if !target.is_finite() || target < 0.0 {
            return Err(CoreError::ValidationError(
                "Savings target must be a non-negative number".into(),
            ));
        }
        plan.savings_target = target;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn get_source_mut(plan: &mut Plan, source_id: Uuid) -> Result<&mut IncomeSource, CoreError> {
        plan.sources
            .iter_mut()
            .find(|s| s.id == source_id)
            .ok_or_else(|| CoreError::SourceNotFound(source_id.to_string()))
    }

    fn validate_source(name: &str, monthly_amount: f64) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Income source name must not be empty".into(),
            ));
        }
        if !monthly_amount.is_finite() || monthly_amount < 0.0 {
            return Err(CoreError::ValidationError(
                "Income amount must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    fn validate_expense(name: &str, amount: f64) -> Result<(), CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Expense name must not be empty".into(),
            ));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(CoreError::ValidationError(
                "Expense amount must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PlanService {
    fn default() -> Self {
        Self::new()
    }
}
