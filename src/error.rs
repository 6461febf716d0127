//! Error types for the projection library

use thiserror::Error;

/// Errors raised at the boundaries of the library (input validation,
/// repository access, file import/export).
///
/// The projection arithmetic itself never fails for a valid month.
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Rejected input record
    #[error("Validation error: {0}")]
    Validation(String),

    /// Month index outside 0..=11 or a year the calendar cannot represent
    #[error("Invalid month: year {year}, month index {month}")]
    InvalidMonth { year: i32, month: u32 },

    /// Date string not in canonical YYYY-MM-DD form
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Record lookup by id failed
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl FinanceError {
    pub fn not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.into(),
        }
    }
}

pub type FinanceResult<T> = Result<T, FinanceError>;
