//! Core projection engine for daily cash-balance projections

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate};

use super::days::{DayProjection, DayStatus, HorizonProjection, MonthProjection};
use super::state::{effective_variable, ProjectionState};
use crate::error::{FinanceError, FinanceResult};
use crate::finance::{format_date, DailyOverride, DailyRealExpense, FinancialConfig, FinancialEvent, ProjectionInputs};

/// Months shown by default on the dashboard
pub const DEFAULT_HORIZON_MONTHS: u32 = 2;

/// Horizons offered by the dashboard selector
pub const HORIZON_CHOICES: [u32; 5] = [1, 2, 3, 4, 12];

/// First day of a month given a 0-indexed month
fn first_of_month(year: i32, month: u32) -> FinanceResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(FinanceError::InvalidMonth { year, month })
}

/// Number of days in a month (0-indexed), accounting for leap years
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    let next = first.checked_add_months(chrono::Months::new(1))?;
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Baseline variable spend per day, always rounded up
pub fn daily_base_budget(monthly_fixed_budget: f64, days_in_month: u32) -> f64 {
    (monthly_fixed_budget / days_in_month as f64).ceil()
}

/// Month `offset` months after (year, month), 0-indexed months
pub fn add_months(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let total = year as i64 * 12 + month as i64 + offset as i64;
    (total.div_euclid(12) as i32, total.rem_euclid(12) as u32)
}

// Matches JavaScript Math.round, which the planned display values follow
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[derive(Debug, Default, Clone, Copy)]
struct DayEvents {
    income: f64,
    fixed_expenses: f64,
}

/// Project every day of one month.
///
/// `month` is 0-indexed. Events, overrides and real expenses are matched to
/// days by exact `YYYY-MM-DD` string equality; records for other months are
/// ignored. The last row's balance is the month's closing balance.
pub fn generate_month_projection(
    year: i32,
    month: u32,
    config: &FinancialConfig,
    events: &[FinancialEvent],
    overrides: &[DailyOverride],
    real_expenses: &[DailyRealExpense],
    starting_balance: f64,
) -> FinanceResult<Vec<DayProjection>> {
    if month > 11 {
        return Err(FinanceError::InvalidMonth { year, month });
    }
    let start = first_of_month(year, month)?;
    let day_count = days_in_month(year, month).ok_or(FinanceError::InvalidMonth { year, month })?;

    let base = daily_base_budget(config.monthly_fixed_budget, day_count);
    if config.monthly_fixed_budget < 0.0 {
        log::warn!(
            "negative monthly budget {} gives daily baseline {}",
            config.monthly_fixed_budget,
            base
        );
    }

    let mut events_by_date: HashMap<&str, DayEvents> = HashMap::new();
    for event in events {
        let day = events_by_date.entry(event.date.as_str()).or_default();
        if event.is_income() {
            day.income += event.amount;
        } else {
            day.fixed_expenses += event.amount;
        }
    }

    let mut state = ProjectionState::new(starting_balance, overrides, real_expenses);
    let mut projections = Vec::with_capacity(day_count as usize);

    for i in 0..day_count {
        let current = start
            .checked_add_days(Days::new(i as u64))
            .ok_or(FinanceError::InvalidMonth { year, month })?;
        let date = format_date(current);

        let DayEvents { income, fixed_expenses } = events_by_date.get(date.as_str()).copied().unwrap_or_default();

        let planned_variable = state.planned_variable(&date, base);
        let real_variable = state.real_variable(&date);
        let total_outgoing = fixed_expenses + effective_variable(real_variable, planned_variable);

        let balance = state.advance_day(income, total_outgoing);

        projections.push(DayProjection {
            day_name: current.format("%a").to_string(),
            date,
            income,
            planned_expense: round_half_up(planned_variable),
            real_expense: real_variable,
            total_expense: total_outgoing,
            balance,
            status: DayStatus::from_balance(balance),
        });
    }

    log::debug!(
        "projected {}-{:02}: {} days, base {}, closing {:.2}",
        year,
        month + 1,
        day_count,
        base,
        state.balance
    );

    Ok(projections)
}

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Year of the first projected month
    pub start_year: i32,

    /// First projected month, 0-indexed
    pub start_month: u32,

    /// Number of consecutive months to project
    pub horizon_months: u32,
}

impl ProjectionConfig {
    pub fn new(start_year: i32, start_month: u32, horizon_months: u32) -> Self {
        Self {
            start_year,
            start_month,
            horizon_months,
        }
    }

    /// Default horizon starting at the month containing `date`
    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0(), DEFAULT_HORIZON_MONTHS)
    }
}

/// Chains monthly projections across a horizon
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project the configured horizon.
    ///
    /// The first month starts from `config.initial_balance`; each following
    /// month starts from the previous month's closing balance.
    pub fn project(&self, inputs: &ProjectionInputs) -> FinanceResult<HorizonProjection> {
        let mut result = HorizonProjection::new(inputs.config.initial_balance);
        let mut running_balance = inputs.config.initial_balance;

        for offset in 0..self.config.horizon_months {
            let (year, month) = add_months(self.config.start_year, self.config.start_month, offset);

            let days = generate_month_projection(
                year,
                month,
                &inputs.config,
                &inputs.events,
                &inputs.overrides,
                &inputs.real_expenses,
                running_balance,
            )?;

            if let Some(last) = days.last() {
                running_balance = last.balance;
            }

            let day_count = days.len() as u32;
            result.add_month(MonthProjection {
                year,
                month,
                daily_base_budget: daily_base_budget(inputs.config.monthly_fixed_budget, day_count),
                days,
            });
        }

        Ok(result)
    }
}

/// Project a horizon without keeping an engine around
pub fn project_horizon(config: &ProjectionConfig, inputs: &ProjectionInputs) -> FinanceResult<HorizonProjection> {
    ProjectionEngine::new(config.clone()).project(inputs)
}
