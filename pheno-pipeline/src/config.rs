//! Run configuration.
//!
//! An explicit struct with documented defaults. Callers distinguish "unset,
//! use the default" (`None`) from an explicit value; nothing falls back on a
//! missing attribute at runtime.

use std::path::PathBuf;

/// Rows per batch when no chunk size is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 50_000;

/// External OWL reasoner invocation settings.
///
/// The reasoner is an opaque java collaborator: it is handed an unreasoned
/// triples file and must produce the named output file.
#[derive(Debug, Clone)]
pub struct ReasonerConfig {
    /// Classpath containing the reasoner's `Main` entry point.
    pub classpath: PathBuf,
    /// Reasoner pipeline configuration file.
    pub config_file: PathBuf,
}

/// Post-reasoning CSV extraction command.
///
/// Invoked once per reasoned file with the input path and the output path
/// appended to `args`.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub program: String,
    pub args: Vec<String>,
}

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Normalized input CSV matching the configured header list.
    pub input: PathBuf,
    /// Directory receiving all run outputs.
    pub output_dir: PathBuf,
    /// Directory holding the project's configuration CSVs.
    pub config_dir: PathBuf,
    /// Ontology IRI the per-run import statement points at.
    pub ontology_iri: String,
    /// Rows per batch.
    pub chunk_size: usize,
    /// Partition the input by this column's value before chunking.
    pub split_column: Option<String>,
    /// Drop invalid rows instead of aborting on error-level violations.
    pub drop_invalid: bool,
    /// Worker pool size. `None` means available parallelism.
    pub num_workers: Option<usize>,
    /// Enables the reasoning stage when set.
    pub reasoner: Option<ReasonerConfig>,
    /// Enables post-reasoning CSV extraction when set. Ignored without a
    /// reasoner.
    pub extract: Option<ExtractConfig>,
}

impl RunConfig {
    /// A configuration with every optional stage off and default sizing.
    pub fn new(
        input: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        config_dir: impl Into<PathBuf>,
        ontology_iri: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            config_dir: config_dir.into(),
            ontology_iri: ontology_iri.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            split_column: None,
            drop_invalid: false,
            num_workers: None,
            reasoner: None,
            extract: None,
        }
    }
}
