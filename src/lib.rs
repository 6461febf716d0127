//! Daily Projection - cash-flow forecasting for a personal budget
//!
//! This library provides:
//! - Day-by-day balance projection for a calendar month
//! - Multi-month horizons chained through closing balances
//! - Safe-to-spend derivation against a savings goal
//! - A repository interface over the persisted finance state
//! - Savings-goal tracking and budget what-if scenarios

pub mod error;
pub mod finance;
pub mod projection;
pub mod savings;
pub mod scenario;
pub mod store;

// Re-export commonly used types
pub use error::{FinanceError, FinanceResult};
pub use finance::{DailyOverride, DailyRealExpense, EventType, FinancialConfig, FinancialEvent, ProjectionInputs};
pub use projection::{
    generate_month_projection, DayProjection, DayStatus, HorizonProjection, ProjectionConfig, ProjectionEngine,
    SafeToSpend,
};
pub use scenario::ScenarioRunner;
pub use store::{FinanceRepository, FinanceState, JsonFileStore, MemoryStore};
