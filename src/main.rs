//! Daily Projection CLI
//!
//! Projects the balance of a finance state file and edits its records

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};

use daily_projection::finance::{parse_date, DailyOverride, EventType};
use daily_projection::projection::{export, HORIZON_CHOICES};
use daily_projection::savings::annual_progress;
use daily_projection::{FinanceRepository, FinanceState, JsonFileStore, ProjectionConfig, ProjectionEngine, SafeToSpend};

#[derive(Parser, Debug)]
#[command(name = "daily_projection", version, about = "Daily cash-flow projection")]
struct Cli {
    /// Finance state file (JSON). Created on first write.
    #[arg(long, default_value = "finance.json")]
    state: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project the balance day by day
    Project {
        /// First projected year (defaults to the current one)
        #[arg(long)]
        year: Option<i32>,

        /// First projected month, 1-12 (defaults to the current one)
        #[arg(long)]
        month: Option<u32>,

        /// Number of months to project
        #[arg(long, default_value_t = 2)]
        months: u32,

        /// Reference day for safe-to-spend (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,

        /// Also write every projected day to this CSV file
        #[arg(long)]
        csv: Option<String>,

        /// Use the built-in demo data instead of the state file
        #[arg(long)]
        demo: bool,
    },

    /// Record income (as an event) or spend (as a logged expense)
    Add {
        /// income or expense
        kind: EventType,
        date: String,
        amount: f64,
        #[arg(default_value = "")]
        category: String,
    },

    /// Add a fixed expense event such as rent
    Bill {
        date: String,
        amount: f64,
        category: String,
    },

    /// Override the planned variable spend for one day
    Plan { date: String, budget: f64 },

    /// Set the monthly variable budget and clear that month's overrides
    Budget {
        year: i32,
        /// 1-12
        month: u32,
        total: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Project {
            year,
            month,
            months,
            today,
            csv,
            demo,
        } => {
            let today = match today {
                Some(s) => parse_date(&s)?,
                None => Local::now().date_naive(),
            };
            let state = if demo {
                FinanceState::demo()
            } else {
                JsonFileStore::open(&cli.state)
                    .with_context(|| format!("Failed to open {}", cli.state))?
                    .state()
                    .clone()
            };
            let year = year.unwrap_or(today.year());
            let month0 = match month {
                Some(m @ 1..=12) => m - 1,
                Some(m) => bail!("month must be within 1-12, got {}", m),
                None => today.month0(),
            };
            if !HORIZON_CHOICES.contains(&months) {
                log::warn!("unusual horizon of {} months", months);
            }
            run_projection(&state, ProjectionConfig::new(year, month0, months), today, csv.as_deref())?;
        }

        Command::Add {
            kind,
            date,
            amount,
            category,
        } => {
            let mut store = JsonFileStore::open(&cli.state)?;
            let id = store.add_transaction(&date, kind, amount, &category)?;
            println!("Added {} {} on {} ({})", kind.as_str(), amount, date, id);
        }

        Command::Bill { date, amount, category } => {
            let mut store = JsonFileStore::open(&cli.state)?;
            let event = daily_projection::FinancialEvent::expense(uuid::Uuid::new_v4().to_string(), &date, amount, category);
            let id = event.id.clone();
            store.add_event(event)?;
            println!("Added bill of {} on {} ({})", amount, date, id);
        }

        Command::Plan { date, budget } => {
            let mut store = JsonFileStore::open(&cli.state)?;
            store.set_daily_override(DailyOverride::new(&date, budget))?;
            println!("Planned {} for {}", budget, date);
        }

        Command::Budget { year, month, total } => {
            if !(1..=12).contains(&month) {
                bail!("month must be within 1-12, got {}", month);
            }
            let mut store = JsonFileStore::open(&cli.state)?;
            store.set_monthly_daily_budget(year, month - 1, total)?;
            println!("Monthly budget set to {} from {}-{:02}", total, year, month);
        }
    }

    Ok(())
}

fn run_projection(state: &FinanceState, config: ProjectionConfig, today: NaiveDate, csv_path: Option<&str>) -> Result<()> {
    let inputs = state.snapshot();
    inputs.validate().context("State file holds invalid records")?;

    let engine = ProjectionEngine::new(config);
    let projection = engine.project(&inputs)?;

    for month in &projection.months {
        println!("\n{}-{:02}  (daily base {:.0})", month.year, month.month + 1, month.daily_base_budget);
        println!(
            "{:>10} {:>4} {:>10} {:>10} {:>10} {:>10} {:>12} {:>9}",
            "Date", "Day", "Income", "Planned", "Real", "Total", "Balance", "Status"
        );
        println!("{}", "-".repeat(82));
        for day in &month.days {
            println!(
                "{:>10} {:>4} {:>10.2} {:>10.0} {:>10.2} {:>10.2} {:>12.2} {:>9}",
                day.date,
                day.day_name,
                day.income,
                day.planned_expense,
                day.real_expense,
                day.total_expense,
                day.balance,
                day.status.as_str(),
            );
        }
    }

    let summary = projection.summary();
    println!("\nSummary:");
    println!("  Months: {}  Days: {}", summary.total_months, summary.total_days);
    println!("  Total Income: {:.2}", summary.total_income);
    println!("  Total Expenses: {:.2}", summary.total_expenses);
    println!("  Net Flow: {:+.2}", summary.net_flow);
    println!("  Closing Balance: {:.2}", summary.closing_balance);
    println!("  Lowest Balance: {:.2}", summary.lowest_balance);
    if let Some(day) = projection.first_critical_day() {
        println!("  First negative day: {}", day);
    }

    match SafeToSpend::for_today(today, &projection, inputs.config.monthly_fixed_budget, state.savings_goals.monthly) {
        Some(safe) => {
            let verdict = if !safe.is_healthy() {
                "deficit"
            } else if safe.is_abundant() {
                "surplus"
            } else {
                "tight, goal still met"
            };
            println!(
                "\nSafe to spend today: {:.0} ({}; goal {:.0}, {:+.0} vs goal)",
                safe.safe_daily, verdict, safe.savings_goal, safe.surplus
            );
        }
        None => println!("\nSafe to spend: {} is outside the projected months", today),
    }

    println!(
        "Savings this year: {:.1}% of {:.0}",
        annual_progress(&state.savings_entries, &state.savings_goals, today.year()),
        state.savings_goals.annual
    );

    if let Some(path) = csv_path {
        export::write_projection_csv(path, &projection).with_context(|| format!("Failed to write {}", path))?;
        println!("\nFull results written to: {}", path);
    }

    Ok(())
}
