//! Running state for a single projected month

use std::collections::HashMap;

use crate::finance::{DailyOverride, DailyRealExpense};

/// Date-keyed lookups plus the balance carried from day to day
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Balance at the end of the last processed day
    pub balance: f64,

    /// Days processed so far
    pub days_elapsed: u32,

    /// Logged variable spend per date, summed on insert
    real_by_date: HashMap<String, f64>,

    /// Override per date; a later override for the same date replaces the
    /// earlier one, including one that carries no budget
    override_by_date: HashMap<String, Option<f64>>,
}

impl ProjectionState {
    /// Build the lookups for a month from unordered input records
    pub fn new(starting_balance: f64, overrides: &[DailyOverride], real_expenses: &[DailyRealExpense]) -> Self {
        let mut real_by_date: HashMap<String, f64> = HashMap::new();
        for expense in real_expenses {
            *real_by_date.entry(expense.date.clone()).or_insert(0.0) += expense.amount;
        }

        let mut override_by_date = HashMap::new();
        for o in overrides {
            override_by_date.insert(o.date.clone(), o.budget);
        }

        Self {
            balance: starting_balance,
            days_elapsed: 0,
            real_by_date,
            override_by_date,
        }
    }

    /// Planned variable spend: the override if one is set, else the baseline
    pub fn planned_variable(&self, date: &str, daily_base_budget: f64) -> f64 {
        self.override_by_date
            .get(date)
            .copied()
            .flatten()
            .unwrap_or(daily_base_budget)
    }

    /// Sum of logged variable spend for the date (0 when none)
    pub fn real_variable(&self, date: &str) -> f64 {
        self.real_by_date.get(date).copied().unwrap_or(0.0)
    }

    /// Apply one day's flows and return the new balance
    pub fn advance_day(&mut self, income: f64, total_outgoing: f64) -> f64 {
        self.balance = self.balance + income - total_outgoing;
        self.days_elapsed += 1;
        self.balance
    }
}

/// Variable spend used in the balance arithmetic.
///
/// Logged spend wins only when strictly positive: a logged 0 cannot be
/// told apart from "nothing logged" and falls back to the plan.
pub fn effective_variable(real_variable: f64, planned_variable: f64) -> f64 {
    if real_variable > 0.0 {
        real_variable
    } else {
        planned_variable
    }
}
