//! Per-day projection output and horizon aggregation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::finance::parse_date;

/// Balance below this is critical
pub const CRITICAL_THRESHOLD: f64 = 0.0;
/// Balance below this (and not critical) is at risk
pub const RISK_THRESHOLD: f64 = 200.0;
/// Balance below this (and not at risk) calls for caution
pub const CAUTION_THRESHOLD: f64 = 1000.0;

/// Classification of a day's ending balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Critical,
    Risk,
    Caution,
    Solid,
}

impl DayStatus {
    /// Classify an end-of-day balance using fixed absolute thresholds
    pub fn from_balance(balance: f64) -> Self {
        if balance < CRITICAL_THRESHOLD {
            DayStatus::Critical
        } else if balance < RISK_THRESHOLD {
            DayStatus::Risk
        } else if balance < CAUTION_THRESHOLD {
            DayStatus::Caution
        } else {
            DayStatus::Solid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Critical => "critical",
            DayStatus::Risk => "risk",
            DayStatus::Caution => "caution",
            DayStatus::Solid => "solid",
        }
    }
}

/// A single projected day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProjection {
    /// Canonical `YYYY-MM-DD` date
    pub date: String,

    /// Short weekday name ("Mon", "Tue", ...)
    pub day_name: String,

    pub income: f64,

    /// Planned variable spend, rounded for display
    pub planned_expense: f64,

    /// Logged variable spend (0 when nothing was logged)
    pub real_expense: f64,

    /// Fixed expense events plus effective variable spend
    pub total_expense: f64,

    /// End-of-day balance
    pub balance: f64,

    pub status: DayStatus,
}

impl DayProjection {
    /// Net cash movement of the day
    pub fn net_flow(&self) -> f64 {
        self.income - self.total_expense
    }
}

/// The projected days of one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthProjection {
    pub year: i32,

    /// 0-indexed month (0 = January)
    pub month: u32,

    /// Baseline variable spend per day for this month
    pub daily_base_budget: f64,

    pub days: Vec<DayProjection>,
}

impl MonthProjection {
    pub fn closing_balance(&self) -> Option<f64> {
        self.days.last().map(|d| d.balance)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        date.year() == self.year && date.month0() == self.month
    }

    /// Look up one day by its canonical date string
    pub fn day(&self, date: &str) -> Option<&DayProjection> {
        self.days.iter().find(|d| d.date == date)
    }
}

/// Chained projection across consecutive months
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonProjection {
    /// Balance the first month started from
    pub starting_balance: f64,

    pub months: Vec<MonthProjection>,
}

impl HorizonProjection {
    pub fn new(starting_balance: f64) -> Self {
        Self {
            starting_balance,
            months: Vec::new(),
        }
    }

    /// Add a projected month
    pub fn add_month(&mut self, month: MonthProjection) {
        self.months.push(month);
    }

    /// All projected days in date order
    pub fn days(&self) -> impl Iterator<Item = &DayProjection> {
        self.months.iter().flat_map(|m| m.days.iter())
    }

    /// Balance after the last projected day (the starting balance if empty)
    pub fn closing_balance(&self) -> f64 {
        self.days().last().map(|d| d.balance).unwrap_or(self.starting_balance)
    }

    /// The projected month containing `date`, if it is inside the horizon
    pub fn month_containing(&self, date: NaiveDate) -> Option<&MonthProjection> {
        self.months.iter().find(|m| m.contains(date))
    }

    /// First projected day whose balance goes negative
    pub fn first_critical_day(&self) -> Option<NaiveDate> {
        self.days()
            .find(|d| d.status == DayStatus::Critical)
            .and_then(|d| parse_date(&d.date).ok())
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_income: f64 = self.days().map(|d| d.income).sum();
        let total_expenses: f64 = self.days().map(|d| d.total_expense).sum();
        let lowest_balance = self
            .days()
            .map(|d| d.balance)
            .fold(None, |low: Option<f64>, b| Some(low.map_or(b, |l| l.min(b))))
            .unwrap_or(self.starting_balance);
        let critical_days = self.days().filter(|d| d.status == DayStatus::Critical).count() as u32;

        ProjectionSummary {
            total_months: self.months.len() as u32,
            total_days: self.days().count() as u32,
            total_income,
            total_expenses,
            net_flow: total_income - total_expenses,
            closing_balance: self.closing_balance(),
            lowest_balance,
            critical_days,
        }
    }
}

/// Summary statistics for a projection horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_days: u32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_flow: f64,
    pub closing_balance: f64,
    pub lowest_balance: f64,
    pub critical_days: u32,
}
