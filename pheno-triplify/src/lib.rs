//! Config-driven RDF triple generation.
//!
//! Maps each valid record of a batch, plus the static entity/relation schema,
//! into N-Triples-style statement strings. Statements carry no terminating
//! ` .`; the pipeline's triple writer appends it per line.
//!
//! Within one row, entity triples precede relation triples; across rows,
//! emission follows input row order; schema-level triples follow all row
//! triples; the single ontology-import statement is last. Output is
//! reproducible for identical input.

pub mod error;
pub mod triplifier;

pub use error::{Result, TriplifyError};
pub use triplifier::Triplifier;
