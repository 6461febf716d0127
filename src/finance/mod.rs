//! Financial records and CSV import

mod data;
pub mod loader;

pub use data::{
    format_date, is_canonical_date, parse_date, DailyOverride, DailyRealExpense, EventType,
    FinancialConfig, FinancialEvent, SavingsEntry, SavingsGoalKind, SavingsGoals, DATE_FORMAT,
};
pub use loader::{load_events, load_events_from_reader, load_real_expenses, load_real_expenses_from_reader};

use crate::error::FinanceResult;
use serde::{Deserialize, Serialize};

/// Owned snapshot of everything the projection engine reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionInputs {
    pub config: FinancialConfig,
    pub events: Vec<FinancialEvent>,
    pub overrides: Vec<DailyOverride>,
    pub real_expenses: Vec<DailyRealExpense>,
}

impl ProjectionInputs {
    pub fn new(config: FinancialConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Reject non-finite or negative amounts and non-canonical dates
    pub fn validate(&self) -> FinanceResult<()> {
        self.config.validate()?;
        for event in &self.events {
            event.validate()?;
        }
        for o in &self.overrides {
            o.validate()?;
        }
        for expense in &self.real_expenses {
            expense.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_validation_stops_at_first_bad_record() {
        let mut inputs = ProjectionInputs::default();
        inputs.events.push(FinancialEvent::income("1", "2026-01-05", 5000.0, "Salary"));
        assert!(inputs.validate().is_ok());

        inputs.real_expenses.push(DailyRealExpense::new("r1", "2026-01-05", f64::NAN, "Food"));
        assert!(inputs.validate().is_err());
    }
}
