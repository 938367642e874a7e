//! Triplification error types.
//!
//! Relation resolution failures surface immediately rather than silently
//! dropping the relation's triples.

use thiserror::Error;

/// Fatal triplification failures.
#[derive(Debug, Error)]
pub enum TriplifyError {
    /// A relation names an entity alias the schema does not declare.
    #[error("Relation `{predicate}` references undeclared entity `{alias}`")]
    UnknownRelationEntity { alias: String, predicate: String },

    /// A row has no value in an entity's unique-key column, so no subject
    /// IRI can be formed for it.
    #[error("Row {row} has no value for unique key `{column}` of entity `{alias}`")]
    MissingUniqueKey {
        row: usize,
        column: String,
        alias: String,
    },

    /// The batch is missing a column the schema maps.
    #[error(transparent)]
    Tabular(#[from] pheno_tabular::TabularError),
}

/// Result type for triplification operations
pub type Result<T> = std::result::Result<T, TriplifyError>;
