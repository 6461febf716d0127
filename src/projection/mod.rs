//! Daily cash-balance projection for single months and multi-month horizons

mod state;
mod engine;
mod days;
mod safe_to_spend;
pub mod export;

pub use state::{effective_variable, ProjectionState};
pub use engine::{
    add_months, daily_base_budget, days_in_month, generate_month_projection, project_horizon, ProjectionConfig,
    ProjectionEngine, DEFAULT_HORIZON_MONTHS, HORIZON_CHOICES,
};
pub use days::{
    DayProjection, DayStatus, HorizonProjection, MonthProjection, ProjectionSummary, CAUTION_THRESHOLD,
    CRITICAL_THRESHOLD, RISK_THRESHOLD,
};
pub use safe_to_spend::SafeToSpend;
