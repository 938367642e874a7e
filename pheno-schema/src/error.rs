//! Schema configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors. All variants are fatal and pre-run: a schema that
/// fails to load aborts the pipeline before any data is processed.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required configuration file is absent.
    #[error("Missing required config file: {}", .0.display())]
    MissingFile(PathBuf),

    /// A required field is blank in a configuration row.
    #[error("Missing required field `{field}` in {file}")]
    MissingField { file: String, field: String },

    /// A rule row is malformed.
    #[error("Invalid rule in \"{file}\": {message}")]
    InvalidRule { file: String, message: String },

    /// A ControlledVocabulary rule references a list that does not exist.
    #[error("Can't find specified list `{0}`")]
    UnknownList(String),

    /// A mapping or relation references an undeclared entity alias.
    #[error("Unknown entity alias `{alias}` in {file}")]
    UnknownEntity { alias: String, file: String },

    /// Two entities declare the same alias.
    #[error("Duplicate entity alias `{0}`")]
    DuplicateAlias(String),

    /// A `{label}` placeholder could not be resolved to an IRI.
    #[error("Unresolved label `{0}`")]
    UnresolvedLabel(String),

    /// A bare configuration value is not a well-formed IRI.
    #[error("Malformed IRI `{0}`")]
    MalformedIri(String),

    /// Error reading a configuration CSV.
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error reading configuration.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;
