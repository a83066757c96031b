//! Error types for the report pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid parameter: window size must be positive, got {0}")]
    InvalidParameter(i64),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),
}
