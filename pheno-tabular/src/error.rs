//! Tabular error types

use thiserror::Error;

/// Errors for batch construction and access.
#[derive(Debug, Error)]
pub enum TabularError {
    /// A batch is missing a column declared in the configured header list.
    /// This indicates malformed input, not bad data, and is fatal to the run.
    #[error("Missing required column: `{0}`")]
    MissingColumn(String),

    /// Row shape inconsistent with the batch schema.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Error reading delimited input.
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error reading input.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for tabular operations
pub type Result<T> = std::result::Result<T, TabularError>;
