//! Persisted finance state and its mutations

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FinanceError, FinanceResult};
use crate::finance::{
    format_date, is_canonical_date, parse_date, DailyOverride, DailyRealExpense, EventType, FinancialConfig,
    FinancialEvent, ProjectionInputs, SavingsEntry, SavingsGoalKind, SavingsGoals,
};

/// Category used for logged spend without an explicit category
pub const VARIABLE_CATEGORY: &str = "Variable";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn check_finite(what: &str, value: f64) -> FinanceResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FinanceError::Validation(format!("{} must be finite, got {}", what, value)))
    }
}

/// Partial update of the financial configuration; `None` fields are kept
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub initial_balance: Option<f64>,
    pub monthly_fixed_budget: Option<f64>,
    pub cycle_start_date: Option<u32>,
    pub monthly_income_goal: Option<f64>,
}

/// Fields that may change when editing a transaction
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
}

/// Everything the dashboard persists about finances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinanceState {
    pub config: FinancialConfig,
    pub events: Vec<FinancialEvent>,
    pub overrides: Vec<DailyOverride>,
    pub real_expenses: Vec<DailyRealExpense>,
    pub savings_goals: SavingsGoals,

    /// Newest first
    pub savings_entries: Vec<SavingsEntry>,

    pub category_budgets: BTreeMap<String, f64>,
}

impl FinanceState {
    /// Default state seeded with a monthly salary and rent
    pub fn demo() -> Self {
        let mut salary = FinancialEvent::income("1", "2026-01-05", 5000.0, "Salary");
        salary.is_recurring = Some(true);
        let mut rent = FinancialEvent::expense("2", "2026-01-08", 850.0, "Rent");
        rent.is_recurring = Some(true);

        Self {
            events: vec![salary, rent],
            ..Self::default()
        }
    }

    /// Owned copies of the engine inputs
    pub fn snapshot(&self) -> ProjectionInputs {
        ProjectionInputs {
            config: self.config.clone(),
            events: self.events.clone(),
            overrides: self.overrides.clone(),
            real_expenses: self.real_expenses.clone(),
        }
    }

    pub fn update_config(&mut self, update: ConfigUpdate) -> FinanceResult<()> {
        let mut config = self.config.clone();
        if let Some(v) = update.initial_balance {
            config.initial_balance = v;
        }
        if let Some(v) = update.monthly_fixed_budget {
            config.monthly_fixed_budget = v;
        }
        if let Some(v) = update.cycle_start_date {
            config.cycle_start_date = v;
        }
        if let Some(v) = update.monthly_income_goal {
            config.monthly_income_goal = Some(v);
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn add_event(&mut self, event: FinancialEvent) -> FinanceResult<()> {
        event.validate()?;
        self.events.push(event);
        Ok(())
    }

    pub fn delete_event(&mut self, id: &str) -> FinanceResult<()> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            return Err(FinanceError::not_found("Event", id));
        }
        Ok(())
    }

    /// Replace the single event of `event_type` on `date` (cell edit).
    ///
    /// A non-positive amount only removes. Returns the new event's id.
    pub fn upsert_event(&mut self, date: &str, event_type: EventType, amount: f64) -> FinanceResult<Option<String>> {
        if !is_canonical_date(date) {
            return Err(FinanceError::InvalidDate(date.to_string()));
        }
        check_finite("event amount", amount)?;

        self.events.retain(|e| !(e.date == date && e.event_type == event_type));
        if amount <= 0.0 {
            return Ok(None);
        }

        let mut event = FinancialEvent::new(new_id(), date, event_type, amount, event_type.generic_category());
        event.is_recurring = Some(false);
        let id = event.id.clone();
        self.events.push(event);
        Ok(Some(id))
    }

    /// Set the plan for one date, replacing any earlier override for it
    pub fn set_daily_override(&mut self, o: DailyOverride) -> FinanceResult<()> {
        o.validate()?;
        self.overrides.retain(|existing| existing.date != o.date);
        self.overrides.push(o);
        Ok(())
    }

    pub fn add_real_expense(&mut self, expense: DailyRealExpense) -> FinanceResult<()> {
        expense.validate()?;
        self.real_expenses.push(expense);
        Ok(())
    }

    /// Record a transaction: income becomes an event, expense becomes
    /// logged variable spend. Returns the new record's id.
    pub fn add_transaction(
        &mut self,
        date: &str,
        event_type: EventType,
        amount: f64,
        category: &str,
    ) -> FinanceResult<String> {
        let id = new_id();
        match event_type {
            EventType::Income => {
                let mut event = FinancialEvent::income(id.clone(), date, amount, category);
                event.is_recurring = Some(false);
                self.add_event(event)?;
            }
            EventType::Expense => {
                let category = if category.is_empty() { VARIABLE_CATEGORY } else { category };
                self.add_real_expense(DailyRealExpense::new(id.clone(), date, amount, category))?;
            }
        }
        Ok(id)
    }

    /// Replace all logged spend on `date` with a single entry.
    ///
    /// Zero is stored; a negative amount only clears the date.
    pub fn set_real_daily_expense(&mut self, date: &str, amount: f64) -> FinanceResult<Option<String>> {
        if !is_canonical_date(date) {
            return Err(FinanceError::InvalidDate(date.to_string()));
        }
        check_finite("real expense amount", amount)?;

        self.real_expenses.retain(|r| r.date != date);
        if amount < 0.0 {
            return Ok(None);
        }

        let expense = DailyRealExpense::new(new_id(), date, amount, VARIABLE_CATEGORY);
        let id = expense.id.clone();
        self.real_expenses.push(expense);
        Ok(Some(id))
    }

    /// Set the monthly budget and drop the overrides inside that month so
    /// the new baseline applies to every day of it
    pub fn set_monthly_daily_budget(&mut self, year: i32, month: u32, total: f64) -> FinanceResult<()> {
        let mut config = self.config.clone();
        config.monthly_fixed_budget = total;
        config.validate()?;
        self.config = config;

        let before = self.overrides.len();
        self.overrides.retain(|o| match parse_date(&o.date) {
            Ok(d) => d.year() != year || d.month0() != month,
            Err(_) => true,
        });
        log::debug!(
            "monthly budget set to {}, cleared {} overrides for {}-{:02}",
            total,
            before - self.overrides.len(),
            year,
            month + 1
        );
        Ok(())
    }

    /// Edit an income event or a logged expense by id
    pub fn update_transaction(&mut self, id: &str, event_type: EventType, update: TransactionUpdate) -> FinanceResult<()> {
        match event_type {
            EventType::Income => {
                let idx = self
                    .events
                    .iter()
                    .position(|e| e.id == id)
                    .ok_or_else(|| FinanceError::not_found("Event", id))?;
                let mut event = self.events[idx].clone();
                if let Some(amount) = update.amount {
                    event.amount = amount;
                }
                if let Some(category) = update.category {
                    event.category = category;
                }
                if let Some(date) = update.date {
                    event.date = date;
                }
                if let Some(note) = update.note {
                    event.description = Some(note);
                }
                event.validate()?;
                self.events[idx] = event;
            }
            EventType::Expense => {
                let idx = self
                    .real_expenses
                    .iter()
                    .position(|e| e.id == id)
                    .ok_or_else(|| FinanceError::not_found("Real expense", id))?;
                let mut expense = self.real_expenses[idx].clone();
                if let Some(amount) = update.amount {
                    expense.amount = amount;
                }
                if let Some(category) = update.category {
                    expense.category = category;
                }
                if let Some(date) = update.date {
                    expense.date = date;
                }
                if let Some(note) = update.note {
                    expense.note = Some(note);
                }
                expense.validate()?;
                self.real_expenses[idx] = expense;
            }
        }
        Ok(())
    }

    pub fn delete_transaction(&mut self, id: &str, event_type: EventType) -> FinanceResult<()> {
        match event_type {
            EventType::Income => self.delete_event(id),
            EventType::Expense => {
                let before = self.real_expenses.len();
                self.real_expenses.retain(|e| e.id != id);
                if self.real_expenses.len() == before {
                    return Err(FinanceError::not_found("Real expense", id));
                }
                Ok(())
            }
        }
    }

    pub fn set_savings_goal(&mut self, kind: SavingsGoalKind, amount: f64) -> FinanceResult<()> {
        check_finite("savings goal", amount)?;
        match kind {
            SavingsGoalKind::Annual => self.savings_goals.annual = amount,
            SavingsGoalKind::Monthly => self.savings_goals.monthly = amount,
        }
        Ok(())
    }

    pub fn add_savings_entry(&mut self, amount: f64, note: Option<String>, date: NaiveDate) -> FinanceResult<String> {
        check_finite("savings amount", amount)?;
        let entry = SavingsEntry {
            id: new_id(),
            date: format_date(date),
            amount,
            note,
        };
        let id = entry.id.clone();
        self.savings_entries.insert(0, entry);
        Ok(id)
    }

    pub fn delete_savings_entry(&mut self, id: &str) -> FinanceResult<()> {
        let before = self.savings_entries.len();
        self.savings_entries.retain(|e| e.id != id);
        if self.savings_entries.len() == before {
            return Err(FinanceError::not_found("Savings entry", id));
        }
        Ok(())
    }

    pub fn set_category_budget(&mut self, category: &str, amount: f64) -> FinanceResult<()> {
        check_finite("category budget", amount)?;
        self.category_budgets.insert(category.to_string(), amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_match_dashboard() {
        let state = FinanceState::default();
        assert_eq!(state.config.monthly_fixed_budget, 1500.0);
        assert_eq!(state.config.cycle_start_date, 1);
        assert_eq!(state.config.monthly_income_goal, Some(3000.0));
        assert_eq!(state.savings_goals.annual, 20_000.0);
        assert_eq!(state.savings_goals.monthly, 1_500.0);
        assert!(state.events.is_empty());
        assert_eq!(FinanceState::demo().events.len(), 2);
    }

    #[test]
    fn test_update_config_is_partial() {
        let mut state = FinanceState::default();
        state
            .update_config(ConfigUpdate {
                initial_balance: Some(250.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(state.config.initial_balance, 250.0);
        assert_eq!(state.config.monthly_fixed_budget, 1500.0);

        let err = state.update_config(ConfigUpdate {
            monthly_fixed_budget: Some(f64::NAN),
            ..Default::default()
        });
        assert!(err.is_err());
        assert_eq!(state.config.monthly_fixed_budget, 1500.0);
    }

    #[test]
    fn test_upsert_event_replaces_same_type_on_date() {
        let mut state = FinanceState::demo();
        let id = state.upsert_event("2026-01-05", EventType::Income, 4200.0).unwrap();
        assert!(id.is_some());

        let incomes: Vec<_> = state.events.iter().filter(|e| e.date == "2026-01-05").collect();
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].amount, 4200.0);
        assert_eq!(incomes[0].category, "Income");
        assert_eq!(incomes[0].is_recurring, Some(false));

        // Rent on the 8th is untouched by an income edit there
        state.upsert_event("2026-01-08", EventType::Income, 10.0).unwrap();
        assert_eq!(state.events.iter().filter(|e| e.date == "2026-01-08").count(), 2);

        assert_eq!(state.upsert_event("2026-01-08", EventType::Expense, 0.0).unwrap(), None);
        assert!(state.events.iter().all(|e| !(e.date == "2026-01-08" && e.event_type == EventType::Expense)));
    }

    #[test]
    fn test_override_last_write_wins() {
        let mut state = FinanceState::default();
        state.set_daily_override(DailyOverride::new("2026-01-03", 10.0)).unwrap();
        state.set_daily_override(DailyOverride::new("2026-01-03", 30.0)).unwrap();
        assert_eq!(state.overrides, vec![DailyOverride::new("2026-01-03", 30.0)]);
    }

    #[test]
    fn test_add_transaction_routes_by_type() {
        let mut state = FinanceState::default();
        let income_id = state.add_transaction("2026-01-05", EventType::Income, 300.0, "Gift").unwrap();
        let expense_id = state.add_transaction("2026-01-05", EventType::Expense, 12.0, "").unwrap();

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events[0].id, income_id);
        assert_eq!(state.real_expenses.len(), 1);
        assert_eq!(state.real_expenses[0].id, expense_id);
        assert_eq!(state.real_expenses[0].category, VARIABLE_CATEGORY);

        assert!(state.add_transaction("2026-01-05", EventType::Expense, -3.0, "Food").is_err());
        assert_eq!(state.real_expenses.len(), 1);
    }

    #[test]
    fn test_set_real_daily_expense() {
        let mut state = FinanceState::default();
        state.add_transaction("2026-01-05", EventType::Expense, 12.0, "Food").unwrap();
        state.add_transaction("2026-01-05", EventType::Expense, 8.0, "Fun").unwrap();

        state.set_real_daily_expense("2026-01-05", 0.0).unwrap();
        assert_eq!(state.real_expenses.len(), 1);
        assert_eq!(state.real_expenses[0].amount, 0.0);

        assert_eq!(state.set_real_daily_expense("2026-01-05", -1.0).unwrap(), None);
        assert!(state.real_expenses.is_empty());
    }

    #[test]
    fn test_set_monthly_budget_clears_only_that_month() {
        let mut state = FinanceState::default();
        state.set_daily_override(DailyOverride::new("2026-01-03", 10.0)).unwrap();
        state.set_daily_override(DailyOverride::new("2026-01-31", 10.0)).unwrap();
        state.set_daily_override(DailyOverride::new("2026-02-01", 10.0)).unwrap();
        state.set_daily_override(DailyOverride::new("2025-01-03", 10.0)).unwrap();

        state.set_monthly_daily_budget(2026, 0, 1800.0).unwrap();
        assert_eq!(state.config.monthly_fixed_budget, 1800.0);

        let dates: Vec<&str> = state.overrides.iter().map(|o| o.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-02-01", "2025-01-03"]);
    }

    #[test]
    fn test_update_and_delete_transaction() {
        let mut state = FinanceState::default();
        let income = state.add_transaction("2026-01-05", EventType::Income, 300.0, "Gift").unwrap();
        let expense = state.add_transaction("2026-01-06", EventType::Expense, 12.0, "Food").unwrap();

        state
            .update_transaction(
                &income,
                EventType::Income,
                TransactionUpdate {
                    amount: Some(350.0),
                    note: Some("birthday".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(state.events[0].amount, 350.0);
        assert_eq!(state.events[0].description.as_deref(), Some("birthday"));

        let bad_date = TransactionUpdate {
            date: Some("06/01/2026".into()),
            ..Default::default()
        };
        assert!(state.update_transaction(&expense, EventType::Expense, bad_date).is_err());
        assert_eq!(state.real_expenses[0].date, "2026-01-06");

        let missing = state.update_transaction("nope", EventType::Expense, TransactionUpdate::default());
        assert!(matches!(missing, Err(FinanceError::NotFound { .. })));

        state.delete_transaction(&expense, EventType::Expense).unwrap();
        assert!(state.real_expenses.is_empty());
        state.delete_transaction(&income, EventType::Income).unwrap();
        assert!(state.events.is_empty());
        assert!(state.delete_transaction(&income, EventType::Income).is_err());
    }

    #[test]
    fn test_savings_entries_newest_first() {
        let mut state = FinanceState::default();
        let first = state.add_savings_entry(100.0, None, date(2026, 1, 10)).unwrap();
        let second = state.add_savings_entry(50.0, Some("bonus".into()), date(2026, 2, 10)).unwrap();

        assert_eq!(state.savings_entries[0].id, second);
        assert_eq!(state.savings_entries[1].id, first);
        assert_eq!(state.savings_entries[1].date, "2026-01-10");

        state.delete_savings_entry(&first).unwrap();
        assert_eq!(state.savings_entries.len(), 1);

        state.set_savings_goal(SavingsGoalKind::Monthly, 900.0).unwrap();
        assert_eq!(state.savings_goals.monthly, 900.0);
        assert_eq!(state.savings_goals.annual, 20_000.0);
    }

    #[test]
    fn test_snapshot_copies_engine_inputs() {
        let mut state = FinanceState::demo();
        state.set_category_budget("Food", 300.0).unwrap();
        let inputs = state.snapshot();
        assert_eq!(inputs.events, state.events);
        assert_eq!(inputs.config, state.config);
        assert_eq!(state.category_budgets.get("Food"), Some(&300.0));
    }

    #[test]
    fn test_state_json_uses_dashboard_field_names() {
        let json = r#"{
            "config": {"initialBalance": 100, "monthlyFixedBudget": 1200, "cycleStartDate": 1},
            "realExpenses": [{"id": "r", "date": "2026-01-02", "amount": 5, "category": "Food"}]
        }"#;
        let state: FinanceState = serde_json::from_str(json).unwrap();
        assert_eq!(state.config.monthly_fixed_budget, 1200.0);
        assert_eq!(state.config.monthly_income_goal, None);
        assert_eq!(state.real_expenses.len(), 1);
        assert_eq!(state.savings_goals, SavingsGoals::default());
    }
}
