//! Validation error types.
//!
//! Row-level rule violations are never errors; they are accumulated and
//! logged. These variants cover the fatal cases only.

use thiserror::Error;

/// Fatal validation failures.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Input batch shape does not match the configured header list.
    #[error(transparent)]
    Tabular(#[from] pheno_tabular::TabularError),

    /// A rule references a vocabulary list the schema did not load.
    #[error("Can't find specified list `{0}`")]
    MissingList(String),

    /// Error writing to the invalid-data sink.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error on the invalid-data sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, ValidateError>;
