//! Financial records consumed by the projection engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

/// Canonical date format used for every date-keyed lookup
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a calendar date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a canonical `YYYY-MM-DD` date string
pub fn parse_date(s: &str) -> FinanceResult<NaiveDate> {
    if !is_canonical_date(s) {
        return Err(FinanceError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| FinanceError::InvalidDate(s.to_string()))
}

/// True if `s` is exactly the canonical rendering of a real date.
///
/// Events are matched to days by string equality, so `2026-1-5` must be
/// rejected even though it names a valid day.
pub fn is_canonical_date(s: &str) -> bool {
    match NaiveDate::parse_from_str(s, DATE_FORMAT) {
        Ok(date) => format_date(date) == s,
        Err(_) => false,
    }
}

fn check_amount(what: &str, amount: f64) -> FinanceResult<()> {
    if !amount.is_finite() {
        return Err(FinanceError::Validation(format!("{} must be finite, got {}", what, amount)));
    }
    if amount < 0.0 {
        return Err(FinanceError::Validation(format!("{} must not be negative, got {}", what, amount)));
    }
    Ok(())
}

fn check_date(date: &str) -> FinanceResult<()> {
    if is_canonical_date(date) {
        Ok(())
    } else {
        Err(FinanceError::InvalidDate(date.to_string()))
    }
}

/// User-level financial settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialConfig {
    /// Balance the first projected month starts from
    pub initial_balance: f64,

    /// Total variable-spend allowance for a calendar month
    pub monthly_fixed_budget: f64,

    /// Day of month the budget cycle starts on
    pub cycle_start_date: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income_goal: Option<f64>,
}

impl Default for FinancialConfig {
    fn default() -> Self {
        Self {
            initial_balance: 0.0,
            monthly_fixed_budget: 1500.0,
            cycle_start_date: 1,
            monthly_income_goal: Some(3000.0),
        }
    }
}

impl FinancialConfig {
    pub fn validate(&self) -> FinanceResult<()> {
        if !self.initial_balance.is_finite() {
            return Err(FinanceError::Validation(format!(
                "initial balance must be finite, got {}",
                self.initial_balance
            )));
        }
        check_amount("monthly budget", self.monthly_fixed_budget)?;
        if !(1..=31).contains(&self.cycle_start_date) {
            return Err(FinanceError::Validation(format!(
                "cycle start day must be within 1-31, got {}",
                self.cycle_start_date
            )));
        }
        if let Some(goal) = self.monthly_income_goal {
            check_amount("monthly income goal", goal)?;
        }
        Ok(())
    }
}

/// Direction of a dated cash movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Income,
    Expense,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Income => "income",
            EventType::Expense => "expense",
        }
    }

    /// Category given to events created by quick cell edits
    pub fn generic_category(&self) -> &'static str {
        match self {
            EventType::Income => "Income",
            EventType::Expense => "Expense",
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(EventType::Income),
            "expense" => Ok(EventType::Expense),
            other => Err(FinanceError::Validation(format!("Unknown event type: {}", other))),
        }
    }
}

/// A discrete dated cash movement (salary, rent, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEvent {
    pub id: String,

    /// Canonical `YYYY-MM-DD` date
    pub date: String,

    #[serde(rename = "type")]
    pub event_type: EventType,

    pub amount: f64,

    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

impl FinancialEvent {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        event_type: EventType,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            event_type,
            amount,
            category: category.into(),
            description: None,
            is_recurring: None,
        }
    }

    pub fn income(id: impl Into<String>, date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self::new(id, date, EventType::Income, amount, category)
    }

    pub fn expense(id: impl Into<String>, date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self::new(id, date, EventType::Expense, amount, category)
    }

    pub fn is_income(&self) -> bool {
        self.event_type == EventType::Income
    }

    pub fn validate(&self) -> FinanceResult<()> {
        check_date(&self.date)?;
        check_amount("event amount", self.amount)
    }
}

/// Replacement for the baseline daily plan on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOverride {
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

impl DailyOverride {
    pub fn new(date: impl Into<String>, budget: f64) -> Self {
        Self {
            date: date.into(),
            budget: Some(budget),
        }
    }

    pub fn validate(&self) -> FinanceResult<()> {
        check_date(&self.date)?;
        if let Some(budget) = self.budget {
            check_amount("override budget", budget)?;
        }
        Ok(())
    }
}

/// Variable spend actually logged for a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRealExpense {
    pub id: String,

    pub date: String,

    pub amount: f64,

    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DailyRealExpense {
    pub fn new(id: impl Into<String>, date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            amount,
            category: category.into(),
            note: None,
        }
    }

    pub fn validate(&self) -> FinanceResult<()> {
        check_date(&self.date)?;
        check_amount("real expense amount", self.amount)
    }
}

/// Savings targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoals {
    pub annual: f64,
    pub monthly: f64,
}

impl Default for SavingsGoals {
    fn default() -> Self {
        Self {
            annual: 20_000.0,
            monthly: 1_500.0,
        }
    }
}

/// Which savings target to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SavingsGoalKind {
    Annual,
    Monthly,
}

/// A single deposit towards the savings goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEntry {
    pub id: String,

    /// Date of the deposit. Older state files carry a full ISO timestamp,
    /// only the leading `YYYY-MM-DD` part is interpreted.
    pub date: String,

    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl SavingsEntry {
    /// Calendar day of the entry, if its date is readable
    pub fn day(&self) -> Option<NaiveDate> {
        let prefix = self.date.get(..10)?;
        NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
    }
}
