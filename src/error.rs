//! Error type for the I/O edges of the planner
//!
//! The projection functions themselves are total; only loading assumption tables,
//! reading client records and writing output can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid assumption table {table}: {reason}")]
    InvalidTable { table: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, PlannerError>;
