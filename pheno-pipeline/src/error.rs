//! Pipeline error types.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration directory failed to load.
    #[error(transparent)]
    Schema(#[from] pheno_schema::SchemaError),

    /// A batch failed validation fatally (malformed input).
    #[error(transparent)]
    Validate(#[from] pheno_validate::ValidateError),

    /// Triplification failed for a row.
    #[error(transparent)]
    Triplify(#[from] pheno_triplify::TriplifyError),

    /// Input CSV does not match the expected shape.
    #[error(transparent)]
    Tabular(#[from] pheno_tabular::TabularError),

    /// A batch is unusable: no rows survived dropping, or an error-level
    /// violation persists without drop-invalid. The run aborts.
    #[error("Batch `{batch}` failed validation; invalid rows recorded at `{}`", sink_path.display())]
    InvalidBatch { batch: String, sink_path: PathBuf },

    /// The reasoner or extraction subprocess exited non-zero or produced no
    /// output file.
    #[error("External tool failed: `{command}`\n{output}")]
    ExternalTool { command: String, output: String },

    /// No preprocessor is registered under the requested project name.
    #[error("Unknown preprocessor `{0}`")]
    UnknownPreProcessor(String),

    /// Worker pool construction failed.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
