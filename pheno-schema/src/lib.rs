//! Declarative triplification schema for the phenology pipeline.
//!
//! This crate parses the CSV-based configuration directory (entities,
//! relations, column-to-predicate mappings, validation rules, controlled
//! vocabularies) into an in-memory model consumed by the validator and
//! triplifier.
//!
//! # Loading order
//!
//! Configuration files load in dependency order: `headers.csv`, `rules.csv`,
//! the vocabulary list files the rules reference (plus the mandatory
//! phenophase description list), `entity.csv`, `mapping.csv`, `relations.csv`.
//!
//! # Labels
//!
//! Any IRI-valued configuration field may instead carry a `{label}`
//! placeholder, resolved against a [`LabelResolver`] at load time. A label the
//! resolver does not know, or a bare value that is not a well-formed IRI, is a
//! configuration error — loading fails before any data is processed.

pub mod error;
pub mod labels;
pub mod loader;
pub mod model;

pub use error::{Result, SchemaError};
pub use labels::{resolve_label, LabelResolver, StaticLabelMap};
pub use loader::ProjectSchema;
pub use model::{ColumnMapping, Entity, Relation, Rule, RuleKind, Severity, VocabList, VocabTerm};
