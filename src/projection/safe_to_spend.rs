//! How much can be spent per day while still reaching the month's savings goal

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::days::HorizonProjection;
use super::engine::{daily_base_budget, days_in_month};

/// Daily spend that redistributes the projected surplus (or deficit) over
/// the remaining days of the month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeToSpend {
    pub daily_base_budget: f64,
    pub projected_end_balance: f64,
    pub savings_goal: f64,
    pub days_remaining: i64,

    /// Projected end balance minus the goal
    pub surplus: f64,

    pub daily_adjustment: f64,

    /// Floored so it never overpromises
    pub safe_daily: f64,
}

impl SafeToSpend {
    /// `projected_end_balance` must already assume the baseline is spent on
    /// every remaining day. Returns `None` once no days remain.
    pub fn derive(
        daily_base_budget: f64,
        projected_end_balance: f64,
        savings_goal: f64,
        days_remaining: i64,
    ) -> Option<Self> {
        if days_remaining <= 0 {
            return None;
        }

        let surplus = projected_end_balance - savings_goal;
        let daily_adjustment = surplus / days_remaining as f64;
        let safe_daily = (daily_base_budget + daily_adjustment).floor();

        Some(Self {
            daily_base_budget,
            projected_end_balance,
            savings_goal,
            days_remaining,
            surplus,
            daily_adjustment,
            safe_daily,
        })
    }

    /// Derive for `today` from the month of the horizon that contains it.
    ///
    /// Days remaining count today. `None` if today's month was not projected.
    pub fn for_today(
        today: NaiveDate,
        projection: &HorizonProjection,
        monthly_fixed_budget: f64,
        savings_goal: f64,
    ) -> Option<Self> {
        let month = projection.month_containing(today)?;
        let projected_end = month.closing_balance()?;

        let day_count = days_in_month(today.year(), today.month0())?;
        let days_remaining = (day_count - today.day()) as i64 + 1;
        let base = daily_base_budget(monthly_fixed_budget, month.days.len() as u32);

        Self::derive(base, projected_end, savings_goal, days_remaining)
    }

    /// Something is left to spend today
    pub fn is_healthy(&self) -> bool {
        self.safe_daily > 0.0
    }

    /// At least the baseline can be spent
    pub fn is_abundant(&self) -> bool {
        self.safe_daily >= self.daily_base_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::{FinancialConfig, FinancialEvent, ProjectionInputs};
    use crate::projection::{ProjectionConfig, ProjectionEngine};
    use approx::assert_relative_eq;

    #[test]
    fn test_surplus_spread_over_remaining_days() {
        let s = SafeToSpend::derive(49.0, 2500.0, 1500.0, 10).unwrap();
        assert_eq!(s.surplus, 1000.0);
        assert_eq!(s.daily_adjustment, 100.0);
        assert_eq!(s.safe_daily, 149.0);
        assert!(s.is_healthy());
        assert!(s.is_abundant());
    }

    #[test]
    fn test_result_is_floored() {
        // 49 + 100/3 = 82.33
        let s = SafeToSpend::derive(49.0, 1600.0, 1500.0, 3).unwrap();
        assert_relative_eq!(s.daily_adjustment, 100.0 / 3.0);
        assert_eq!(s.safe_daily, 82.0);

        // 49 - 100/3 = 15.67
        let s = SafeToSpend::derive(49.0, 1400.0, 1500.0, 3).unwrap();
        assert_eq!(s.safe_daily, 15.0);
        assert!(s.is_healthy());
        assert!(!s.is_abundant());
    }

    #[test]
    fn test_deficit_goes_negative() {
        let s = SafeToSpend::derive(49.0, 0.0, 1500.0, 10).unwrap();
        assert_eq!(s.safe_daily, -101.0);
        assert!(!s.is_healthy());
    }

    #[test]
    fn test_no_days_remaining_is_no_op() {
        assert!(SafeToSpend::derive(49.0, 2500.0, 1500.0, 0).is_none());
        assert!(SafeToSpend::derive(49.0, 2500.0, 1500.0, -3).is_none());
    }

    #[test]
    fn test_for_today_uses_month_in_horizon() {
        let mut inputs = ProjectionInputs::new(FinancialConfig::default());
        inputs.events.push(FinancialEvent::income("1", "2026-01-05", 5000.0, "Salary"));
        let horizon = ProjectionEngine::new(ProjectionConfig::new(2026, 0, 2))
            .project(&inputs)
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 1, 22).unwrap();
        let s = SafeToSpend::for_today(today, &horizon, 1500.0, 1500.0).unwrap();

        // 31 - 22 + 1 days left, January closes at 5000 - 31 * 49 = 3481
        assert_eq!(s.days_remaining, 10);
        assert_eq!(s.daily_base_budget, 49.0);
        assert_eq!(s.projected_end_balance, 3481.0);
        assert_eq!(s.safe_daily, (49.0_f64 + 1981.0 / 10.0).floor());

        let last_day = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert_eq!(SafeToSpend::for_today(last_day, &horizon, 1500.0, 1500.0).unwrap().days_remaining, 1);

        let outside = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert!(SafeToSpend::for_today(outside, &horizon, 1500.0, 1500.0).is_none());
    }
}
