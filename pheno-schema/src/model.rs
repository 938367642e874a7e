//! Schema model types.
//!
//! The declarative counterparts of the configuration CSVs: entities (typed
//! triplification targets), relations (predicates linking two entities per
//! row), validation rules, and controlled-vocabulary lists.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a validation rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Logged; never blocks a batch.
    Warning,
    /// Blocks the batch unless invalid rows are dropped.
    Error,
}

impl Severity {
    /// Parse a rule's `level` field. Blank or unrecognized values default to
    /// `warning`.
    pub fn parse(level: &str) -> Self {
        if level.eq_ignore_ascii_case("error") {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("WARNING"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}

/// The validation constraint kinds a rule may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    RequiredValue,
    ControlledVocabulary,
    UniqueValue,
    Integer,
    Float,
}

impl RuleKind {
    /// Names accepted in `rules.csv`, used in error messages.
    pub const VALID_NAMES: [&'static str; 5] = [
        "RequiredValue",
        "ControlledVocabulary",
        "UniqueValue",
        "Integer",
        "Float",
    ];

    /// Parse a rule kind name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "RequiredValue" => Some(RuleKind::RequiredValue),
            "ControlledVocabulary" => Some(RuleKind::ControlledVocabulary),
            "UniqueValue" => Some(RuleKind::UniqueValue),
            "Integer" => Some(RuleKind::Integer),
            "Float" => Some(RuleKind::Float),
            _ => None,
        }
    }
}

/// A declarative validation constraint over one or more columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub kind: RuleKind,
    /// Columns the rule applies to (pipe-delimited in `rules.csv`).
    pub columns: Vec<String>,
    pub level: Severity,
    /// Named vocabulary list; ControlledVocabulary rules only.
    pub list: Option<String>,
}

/// One allowed value in a controlled vocabulary, optionally mapped to the IRI
/// that defines it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabTerm {
    pub field: String,
    pub defined_by: Option<String>,
}

/// A named allow-list of field values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabList {
    pub name: String,
    pub terms: Vec<VocabTerm>,
}

impl VocabList {
    /// Whether `value` is a member of this list.
    pub fn contains(&self, value: &str) -> bool {
        self.terms.iter().any(|t| t.field == value)
    }

    /// The `defined_by` IRI for `value`, if the list maps it to one.
    pub fn defined_by(&self, value: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|t| t.field == value)
            .and_then(|t| t.defined_by.as_deref())
    }
}

/// A (source column, predicate IRI) pair attached to an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub column: String,
    pub predicate: String,
    /// Substitute a vocabulary `defined_by` IRI for the literal value when the
    /// column's list maps it. Always on when the predicate is `rdf:type`.
    pub substitute: bool,
}

/// A triplification target: maps a row's unique key to a typed RDF subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique short name referenced by relations and mappings.
    pub alias: String,
    /// The RDF class IRI this entity instantiates.
    pub concept_uri: String,
    /// Source column whose value forms this entity's per-row identity.
    pub unique_key: String,
    /// URI prefix concatenated with the unique-key value to form the subject.
    pub identifier_root: String,
    /// Column-to-predicate mappings, in `mapping.csv` order.
    pub columns: Vec<ColumnMapping>,
}

/// A predicate connecting two entities' subjects for the same row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    pub subject_alias: String,
    pub predicate: String,
    pub object_alias: String,
}
