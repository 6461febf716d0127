//! Repository interface over the persisted finance state
//!
//! The projection engine never touches a repository: callers take a
//! [`ProjectionInputs`] snapshot and hand plain data to the engine.

mod state;
mod file;

pub use state::{ConfigUpdate, FinanceState, TransactionUpdate, VARIABLE_CATEGORY};
pub use file::JsonFileStore;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::FinanceResult;
use crate::finance::{
    DailyOverride, DailyRealExpense, EventType, FinancialConfig, FinancialEvent, ProjectionInputs, SavingsEntry,
    SavingsGoalKind, SavingsGoals,
};

/// Read and mutate finance records.
///
/// Implementors provide access to the state and a transactional `update`;
/// every mutation goes through `update`, so a failed mutation leaves the
/// stored state unchanged.
pub trait FinanceRepository {
    fn state(&self) -> &FinanceState;

    fn update<T, F>(&mut self, f: F) -> FinanceResult<T>
    where
        F: FnOnce(&mut FinanceState) -> FinanceResult<T>;

    fn config(&self) -> &FinancialConfig {
        &self.state().config
    }

    fn events(&self) -> &[FinancialEvent] {
        &self.state().events
    }

    fn overrides(&self) -> &[DailyOverride] {
        &self.state().overrides
    }

    fn real_expenses(&self) -> &[DailyRealExpense] {
        &self.state().real_expenses
    }

    fn savings_goals(&self) -> &SavingsGoals {
        &self.state().savings_goals
    }

    fn savings_entries(&self) -> &[SavingsEntry] {
        &self.state().savings_entries
    }

    fn category_budgets(&self) -> &BTreeMap<String, f64> {
        &self.state().category_budgets
    }

    fn snapshot(&self) -> ProjectionInputs {
        self.state().snapshot()
    }

    fn update_config(&mut self, update: ConfigUpdate) -> FinanceResult<()> {
        self.update(|s| s.update_config(update))
    }

    fn add_event(&mut self, event: FinancialEvent) -> FinanceResult<()> {
        self.update(|s| s.add_event(event))
    }

    fn delete_event(&mut self, id: &str) -> FinanceResult<()> {
        self.update(|s| s.delete_event(id))
    }

    fn upsert_event(&mut self, date: &str, event_type: EventType, amount: f64) -> FinanceResult<Option<String>> {
        self.update(|s| s.upsert_event(date, event_type, amount))
    }

    fn set_daily_override(&mut self, o: DailyOverride) -> FinanceResult<()> {
        self.update(|s| s.set_daily_override(o))
    }

    fn add_real_expense(&mut self, expense: DailyRealExpense) -> FinanceResult<()> {
        self.update(|s| s.add_real_expense(expense))
    }

    fn add_transaction(&mut self, date: &str, event_type: EventType, amount: f64, category: &str) -> FinanceResult<String> {
        self.update(|s| s.add_transaction(date, event_type, amount, category))
    }

    fn set_real_daily_expense(&mut self, date: &str, amount: f64) -> FinanceResult<Option<String>> {
        self.update(|s| s.set_real_daily_expense(date, amount))
    }

    fn set_monthly_daily_budget(&mut self, year: i32, month: u32, total: f64) -> FinanceResult<()> {
        self.update(|s| s.set_monthly_daily_budget(year, month, total))
    }

    fn update_transaction(&mut self, id: &str, event_type: EventType, update: TransactionUpdate) -> FinanceResult<()> {
        self.update(|s| s.update_transaction(id, event_type, update))
    }

    fn delete_transaction(&mut self, id: &str, event_type: EventType) -> FinanceResult<()> {
        self.update(|s| s.delete_transaction(id, event_type))
    }

    fn set_savings_goal(&mut self, kind: SavingsGoalKind, amount: f64) -> FinanceResult<()> {
        self.update(|s| s.set_savings_goal(kind, amount))
    }

    fn add_savings_entry(&mut self, amount: f64, note: Option<String>, date: NaiveDate) -> FinanceResult<String> {
        self.update(|s| s.add_savings_entry(amount, note, date))
    }

    fn delete_savings_entry(&mut self, id: &str) -> FinanceResult<()> {
        self.update(|s| s.delete_savings_entry(id))
    }

    fn set_category_budget(&mut self, category: &str, amount: f64) -> FinanceResult<()> {
        self.update(|s| s.set_category_budget(category, amount))
    }
}

/// Repository kept only in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: FinanceState,
}

impl MemoryStore {
    pub fn new(state: FinanceState) -> Self {
        Self { state }
    }

    pub fn into_state(self) -> FinanceState {
        self.state
    }
}

impl FinanceRepository for MemoryStore {
    fn state(&self) -> &FinanceState {
        &self.state
    }

    fn update<T, F>(&mut self, f: F) -> FinanceResult<T>
    where
        F: FnOnce(&mut FinanceState) -> FinanceResult<T>,
    {
        let mut next = self.state.clone();
        let value = f(&mut next)?;
        self.state = next;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ProjectionConfig, ProjectionEngine};

    #[test]
    fn test_memory_store_feeds_engine_snapshot() {
        let mut store = MemoryStore::new(FinanceState::demo());
        store.set_daily_override(DailyOverride::new("2026-01-02", 0.0)).unwrap();
        store.add_transaction("2026-01-03", EventType::Expense, 80.0, "Food").unwrap();

        let horizon = ProjectionEngine::new(ProjectionConfig::new(2026, 0, 1))
            .project(&store.snapshot())
            .unwrap();
        let days = &horizon.months[0].days;

        assert_eq!(days[0].balance, -49.0);
        assert_eq!(days[1].balance, -49.0);
        assert_eq!(days[2].balance, -129.0);
        assert_eq!(days[4].balance, -129.0 - 49.0 - 49.0 + 5000.0);
    }

    #[test]
    fn test_failed_update_leaves_state_untouched() {
        let mut store = MemoryStore::default();
        let before = store.state().clone();

        let result = store.update(|s| {
            s.add_event(FinancialEvent::income("1", "2026-01-05", 10.0, "Gift"))?;
            s.add_event(FinancialEvent::income("2", "bad", 10.0, "Gift"))
        });

        assert!(result.is_err());
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_repository_reads() {
        let mut store = MemoryStore::new(FinanceState::demo());
        store.set_category_budget("Food", 250.0).unwrap();
        assert_eq!(store.events().len(), 2);
        assert_eq!(store.config().monthly_fixed_budget, 1500.0);
        assert!(store.overrides().is_empty());
        assert!(store.real_expenses().is_empty());
        assert_eq!(store.savings_goals().monthly, 1500.0);
        assert!(store.savings_entries().is_empty());
        assert_eq!(store.category_budgets().len(), 1);
        store.delete_event("2").unwrap();
        assert_eq!(store.into_state().events.len(), 1);
    }
}
