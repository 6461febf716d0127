//! Savings-goal tracking, independent of the balance projection

use chrono::Datelike;

use crate::finance::{SavingsEntry, SavingsGoals};

/// Annual goal assumed when none is set
pub const DEFAULT_ANNUAL_GOAL: f64 = 20_000.0;

/// Total saved during `year`. Entries with unreadable dates are skipped.
pub fn saved_in_year(entries: &[SavingsEntry], year: i32) -> f64 {
    entries
        .iter()
        .filter(|e| e.day().is_some_and(|d| d.year() == year))
        .map(|e| e.amount)
        .sum()
}

/// Total saved during a month (0-indexed)
pub fn saved_in_month(entries: &[SavingsEntry], year: i32, month: u32) -> f64 {
    entries
        .iter()
        .filter(|e| e.day().is_some_and(|d| d.year() == year && d.month0() == month))
        .map(|e| e.amount)
        .sum()
}

/// Progress towards the annual goal in percent, capped at 100
pub fn annual_progress(entries: &[SavingsEntry], goals: &SavingsGoals, year: i32) -> f64 {
    let goal = if goals.annual > 0.0 { goals.annual } else { DEFAULT_ANNUAL_GOAL };
    (saved_in_year(entries, year) / goal * 100.0).min(100.0)
}

/// Progress towards the monthly goal in percent, capped at 100.
/// A zero monthly goal counts as reached.
pub fn monthly_progress(entries: &[SavingsEntry], goals: &SavingsGoals, year: i32, month: u32) -> f64 {
    if goals.monthly <= 0.0 {
        return 100.0;
    }
    (saved_in_month(entries, year, month) / goals.monthly * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(date: &str, amount: f64) -> SavingsEntry {
        SavingsEntry {
            id: date.to_string(),
            date: date.to_string(),
            amount,
            note: None,
        }
    }

    fn entries() -> Vec<SavingsEntry> {
        vec![
            entry("2026-03-02T10:00:00.000Z", 500.0),
            entry("2026-03-20", 250.0),
            entry("2026-01-15", 1000.0),
            entry("2025-12-31", 4000.0),
            entry("garbage", 99.0),
        ]
    }

    #[test]
    fn test_saved_in_year_and_month() {
        let entries = entries();
        assert_eq!(saved_in_year(&entries, 2026), 1750.0);
        assert_eq!(saved_in_year(&entries, 2025), 4000.0);
        assert_eq!(saved_in_month(&entries, 2026, 2), 750.0);
        assert_eq!(saved_in_month(&entries, 2026, 1), 0.0);
    }

    #[test]
    fn test_annual_progress() {
        let entries = entries();
        let goals = SavingsGoals::default();
        assert_relative_eq!(annual_progress(&entries, &goals, 2026), 8.75);

        let small = SavingsGoals {
            annual: 1000.0,
            monthly: 100.0,
        };
        assert_eq!(annual_progress(&entries, &small, 2026), 100.0);

        let unset = SavingsGoals {
            annual: 0.0,
            monthly: 0.0,
        };
        assert_relative_eq!(annual_progress(&entries, &unset, 2026), 8.75);
        assert_eq!(monthly_progress(&entries, &unset, 2026, 2), 100.0);
    }

    #[test]
    fn test_monthly_progress() {
        let goals = SavingsGoals {
            annual: 20_000.0,
            monthly: 1500.0,
        };
        assert_relative_eq!(monthly_progress(&entries(), &goals, 2026, 2), 50.0);
    }
}
