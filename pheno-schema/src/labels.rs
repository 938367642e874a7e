//! Label-to-IRI resolution.
//!
//! Configuration values may reference ontology terms by label rather than
//! IRI, written as `{label text}`. Resolution goes through the
//! [`LabelResolver`] trait so the ontology-backed label map stays an external
//! collaborator; [`StaticLabelMap`] is the in-process implementation used for
//! offline label tables and tests.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SchemaError};

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("valid regex"));

/// Well-formed absolute IRI: a scheme followed by at least one character that
/// is legal outside angle brackets in N-Triples.
static IRI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s<>"{}|\\^`]+$"#).expect("valid regex")
});

/// Lookup service mapping ontology term labels to IRIs.
pub trait LabelResolver {
    /// Return the IRI for `label`, or `None` if the label is unknown.
    fn lookup(&self, label: &str) -> Option<String>;
}

/// A label map backed by an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct StaticLabelMap {
    map: HashMap<String, String>,
}

impl StaticLabelMap {
    /// Create an empty label map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label/IRI pair.
    pub fn insert(&mut self, label: impl Into<String>, iri: impl Into<String>) {
        self.map.insert(label.into(), iri.into());
    }

    /// Load a two-column (`label,iri`) CSV table.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        let mut map = HashMap::new();
        for record in reader.records() {
            let record = record?;
            if let (Some(label), Some(iri)) = (record.get(0), record.get(1)) {
                map.insert(label.to_string(), iri.to_string());
            }
        }
        Ok(Self { map })
    }
}

impl LabelResolver for StaticLabelMap {
    fn lookup(&self, label: &str) -> Option<String> {
        self.map.get(label).cloned()
    }
}

/// Resolve a configuration value to an IRI.
///
/// Every `{label}` placeholder in `text` is replaced with the IRI the
/// resolver returns for it; an unknown label is a configuration error naming
/// the label. A value with no placeholder must already be a well-formed IRI
/// and is returned unchanged.
pub fn resolve_label(text: &str, resolver: &dyn LabelResolver) -> Result<String> {
    if !PLACEHOLDER_RE.is_match(text) {
        if !IRI_RE.is_match(text) {
            return Err(SchemaError::MalformedIri(text.to_string()));
        }
        return Ok(text.to_string());
    }

    let mut result = text.to_string();
    for cap in PLACEHOLDER_RE.captures_iter(text) {
        let full_match = cap.get(0).expect("capture 0 always present").as_str();
        let label = &cap[1];
        match resolver.lookup(label) {
            Some(iri) => {
                result = result.replace(full_match, &iri);
            }
            None => return Err(SchemaError::UnresolvedLabel(label.to_string())),
        }
    }
    Ok(result)
}
