//! Load events and logged expenses from CSV exports

use super::{DailyRealExpense, EventType, FinancialEvent};
use crate::error::FinanceResult;
use csv::Reader;
use std::path::Path;

/// Raw CSV row for events: id,date,type,amount,category,description,is_recurring
#[derive(Debug, serde::Deserialize)]
struct EventRow {
    id: String,
    date: String,
    #[serde(rename = "type")]
    event_type: String,
    amount: f64,
    category: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_recurring: Option<bool>,
}

impl EventRow {
    fn to_event(self) -> FinanceResult<FinancialEvent> {
        let event_type: EventType = self.event_type.parse()?;

        let event = FinancialEvent {
            id: self.id,
            date: self.date,
            event_type,
            amount: self.amount,
            category: self.category,
            description: self.description.filter(|d| !d.is_empty()),
            is_recurring: self.is_recurring,
        };
        event.validate()?;
        Ok(event)
    }
}

/// Raw CSV row for real expenses: id,date,amount,category,note
#[derive(Debug, serde::Deserialize)]
struct ExpenseRow {
    id: String,
    date: String,
    amount: f64,
    category: String,
    #[serde(default)]
    note: Option<String>,
}

impl ExpenseRow {
    fn to_expense(self) -> FinanceResult<DailyRealExpense> {
        let expense = DailyRealExpense {
            id: self.id,
            date: self.date,
            amount: self.amount,
            category: self.category,
            note: self.note.filter(|n| !n.is_empty()),
        };
        expense.validate()?;
        Ok(expense)
    }
}

/// Load all events from a CSV file
pub fn load_events<P: AsRef<Path>>(path: P) -> FinanceResult<Vec<FinancialEvent>> {
    let file = std::fs::File::open(path)?;
    load_events_from_reader(file)
}

/// Load events from any reader (e.g., string buffer)
pub fn load_events_from_reader<R: std::io::Read>(reader: R) -> FinanceResult<Vec<FinancialEvent>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut events = Vec::new();

    for result in csv_reader.deserialize() {
        let row: EventRow = result?;
        events.push(row.to_event()?);
    }

    log::debug!("loaded {} events from CSV", events.len());
    Ok(events)
}

/// Load all logged expenses from a CSV file
pub fn load_real_expenses<P: AsRef<Path>>(path: P) -> FinanceResult<Vec<DailyRealExpense>> {
    let file = std::fs::File::open(path)?;
    load_real_expenses_from_reader(file)
}

pub fn load_real_expenses_from_reader<R: std::io::Read>(reader: R) -> FinanceResult<Vec<DailyRealExpense>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut expenses = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ExpenseRow = result?;
        expenses.push(row.to_expense()?);
    }

    log::debug!("loaded {} real expenses from CSV", expenses.len());
    Ok(expenses)
}
