//! Compare closing balances under alternative monthly budgets
//!
//! Projects the same finance state once per budget (in parallel) and prints
//! one summary line per budget.

use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;

use daily_projection::{FinanceRepository, JsonFileStore, ProjectionConfig, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "compare_budgets", about = "Project several monthly budgets side by side")]
struct Args {
    /// Finance state file (JSON)
    #[arg(long, default_value = "finance.json")]
    state: String,

    /// Monthly budget to try; repeat for each scenario
    #[arg(long = "budget", required = true)]
    budgets: Vec<f64>,

    /// Number of months to project from the current month
    #[arg(long, default_value_t = 3)]
    months: u32,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let store = JsonFileStore::open(&args.state).with_context(|| format!("Failed to open {}", args.state))?;

    let today = Local::now().date_naive();
    let config = ProjectionConfig::new(today.year(), today.month0(), args.months);
    let runner = ScenarioRunner::new(store.snapshot(), config);

    log::info!("running {} budget scenarios over {} months", args.budgets.len(), args.months);
    let scenarios = runner.run_budgets(&args.budgets)?;

    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>12} {:>9}",
        "Budget", "Income", "Expenses", "Closing", "Lowest", "Neg.Days"
    );
    println!("{}", "-".repeat(72));
    for s in &scenarios {
        println!(
            "{:>10.0} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>9}",
            s.monthly_budget,
            s.summary.total_income,
            s.summary.total_expenses,
            s.summary.closing_balance,
            s.summary.lowest_balance,
            s.summary.critical_days,
        );
    }

    Ok(())
}
