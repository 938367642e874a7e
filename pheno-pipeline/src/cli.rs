//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

use pheno_pipeline::config::DEFAULT_CHUNK_SIZE;

/// Phenology observation triplification pipeline.
#[derive(Parser, Debug)]
#[command(name = "pheno", version, about)]
pub struct Cli {
    /// Input CSV (normalized, or raw for a registered preprocessor)
    pub input: PathBuf,

    /// Directory receiving all run outputs
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Directory holding the project's configuration CSVs
    #[arg(short, long)]
    pub config_dir: PathBuf,

    /// Ontology IRI the import statement points at
    #[arg(long)]
    pub ontology: String,

    /// Preprocessor to run on the input
    #[arg(long, default_value = "passthrough")]
    pub preprocessor: String,

    /// Two-column (label,iri) CSV backing `{label}` resolution
    #[arg(long)]
    pub label_map: Option<PathBuf>,

    /// Rows per batch
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Partition the input by this column's value before chunking
    #[arg(long)]
    pub split_column: Option<String>,

    /// Drop invalid rows instead of aborting on error-level violations
    #[arg(long)]
    pub drop_invalid: bool,

    /// Worker pool size (default: available parallelism)
    #[arg(long)]
    pub num_workers: Option<usize>,

    /// Reasoner classpath; enables the reasoning stage
    #[arg(long, requires = "reasoner_config")]
    pub reasoner_classpath: Option<PathBuf>,

    /// Reasoner pipeline configuration file
    #[arg(long, requires = "reasoner_classpath")]
    pub reasoner_config: Option<PathBuf>,

    /// Post-reasoning CSV extraction command (first word is the program)
    #[arg(long, requires = "reasoner_classpath")]
    pub extract_command: Option<String>,

    /// Show log output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
