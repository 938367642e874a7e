//! The run orchestrator.
//!
//! Drives one run end to end: load the schema, plan batches, fan
//! validate+triplify out over a worker pool, then hand the unreasoned files
//! to the external reasoner and extraction stages. Workers share only the
//! uniqueness tracker and the invalid-row sink; everything else is read-only
//! or batch-local.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use pheno_schema::{LabelResolver, ProjectSchema};
use pheno_tabular::RecordBatch;
use pheno_triplify::Triplifier;
use pheno_validate::{InvalidRowSink, UniquenessTracker, Validator};

use crate::config::RunConfig;
use crate::error::{PipelineError, Result};
use crate::external::{Extractor, Reasoner};
use crate::split::{plan_batches, NamedBatch};

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Batches validated and triplified.
    pub batches: usize,
    /// Unreasoned triples files, sorted by path.
    pub unreasoned: Vec<PathBuf>,
    /// Reasoned files, when the reasoner stage ran.
    pub reasoned: Vec<PathBuf>,
    /// Extracted CSV files, when the extraction stage ran.
    pub extracted: Vec<PathBuf>,
    /// Path of the invalid-row sink.
    pub invalid_path: PathBuf,
}

/// One pipeline run over one input file.
pub struct Pipeline {
    config: RunConfig,
}

impl Pipeline {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Execute the run.
    ///
    /// A batch that fails validation irrecoverably aborts the run: no new
    /// batches are scheduled (in-flight ones complete) and the error carries
    /// the invalid-data sink path.
    pub fn run(&self, resolver: &dyn LabelResolver) -> Result<RunSummary> {
        let unreasoned_dir = self.config.output_dir.join("unreasoned");
        fs::create_dir_all(&unreasoned_dir)?;

        let schema = Arc::new(ProjectSchema::load(&self.config.config_dir, resolver)?);

        let input = RecordBatch::from_csv(File::open(&self.config.input)?)?;
        let batches = plan_batches(
            input,
            self.config.split_column.as_deref(),
            self.config.chunk_size,
        )?;
        let batch_count = batches.len();
        tracing::info!(batches = batch_count, "run planned");

        let tracker = Arc::new(UniquenessTracker::for_rules(schema.rules()));
        let sink = Arc::new(InvalidRowSink::create(
            &self.config.output_dir,
            schema.headers(),
        )?);
        let validator = Validator::new(
            Arc::clone(&schema),
            tracker,
            Arc::clone(&sink),
            self.config.drop_invalid,
        );
        let triplifier = Triplifier::new(Arc::clone(&schema), self.config.ontology_iri.clone());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.num_workers.unwrap_or(0))
            .build()
            .map_err(|e| PipelineError::ThreadPool(e.to_string()))?;

        let written: Mutex<Vec<PathBuf>> = Mutex::new(Vec::with_capacity(batch_count));
        pool.install(|| {
            batches.into_par_iter().try_for_each(|named| {
                let path =
                    process_batch(named, &validator, &triplifier, &sink, &unreasoned_dir)?;
                written.lock().push(path);
                Ok::<(), PipelineError>(())
            })
        })?;

        let mut unreasoned = written.into_inner();
        unreasoned.sort();

        let (reasoned, extracted) = self.post_process(&unreasoned)?;

        Ok(RunSummary {
            batches: batch_count,
            unreasoned,
            reasoned,
            extracted,
            invalid_path: sink.path().to_path_buf(),
        })
    }

    /// Reason and extract each unreasoned file, when those stages are
    /// configured.
    fn post_process(&self, unreasoned: &[PathBuf]) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        let Some(reasoner_config) = &self.config.reasoner else {
            return Ok((Vec::new(), Vec::new()));
        };

        let reasoned_dir = self.config.output_dir.join("reasoned");
        fs::create_dir_all(&reasoned_dir)?;
        let reasoner = Reasoner::new(reasoner_config.clone());

        let mut reasoned = Vec::with_capacity(unreasoned.len());
        for input in unreasoned {
            let output = reasoned_dir.join(with_extension(input, "ttl"));
            reasoner.reason(input, &output)?;
            reasoned.push(output);
        }

        let Some(extract_config) = &self.config.extract else {
            return Ok((reasoned, Vec::new()));
        };

        let csv_dir = self.config.output_dir.join("output_csv");
        fs::create_dir_all(&csv_dir)?;
        let extractor = Extractor::new(extract_config.clone());

        let mut extracted = Vec::with_capacity(reasoned.len());
        for input in &reasoned {
            let output = csv_dir.join(with_extension(input, "csv"));
            extractor.extract(input, &output)?;
            extracted.push(output);
        }

        Ok((reasoned, extracted))
    }
}

fn process_batch(
    named: NamedBatch,
    validator: &Validator,
    triplifier: &Triplifier,
    sink: &InvalidRowSink,
    unreasoned_dir: &Path,
) -> Result<PathBuf> {
    let NamedBatch { name, mut batch } = named;

    if !validator.validate(&mut batch)? {
        return Err(PipelineError::InvalidBatch {
            batch: name,
            sink_path: sink.path().to_path_buf(),
        });
    }

    let triples = triplifier.triplify(&batch)?;
    let path = unreasoned_dir.join(format!("{name}.nt"));
    write_triples(&path, &triples)?;
    tracing::debug!(batch = %path.display(), triples = triples.len(), "batch written");
    Ok(path)
}

/// Write statements one per line, each terminated ` .`.
fn write_triples(path: &Path, triples: &[String]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for triple in triples {
        writer.write_all(triple.as_bytes())?;
        writer.write_all(b" .\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn with_extension(path: &Path, extension: &str) -> PathBuf {
    PathBuf::from(path.file_name().unwrap_or_default()).with_extension(extension)
}
