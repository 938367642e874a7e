mod cli;

use clap::Parser;
use colored::Colorize;
use std::process;

use pheno_pipeline::config::{ExtractConfig, ReasonerConfig, RunConfig};
use pheno_pipeline::preprocess::PreProcessorRegistry;
use pheno_pipeline::run::Pipeline;
use pheno_pipeline::{PipelineError, Result};
use pheno_schema::StaticLabelMap;

use cli::Cli;

const EXIT_ERROR: i32 = 1;

fn init_tracing(cli: &Cli) {
    // CLI tracing policy:
    //   --quiet   → "off" (no logs at all)
    //   --verbose → "info", or RUST_LOG when set
    //   default   → "warn" so rule violations stay visible
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    // Rule violations arrive pre-labeled as "{LEVEL}: {message}", so the
    // subscriber must not prepend its own level token.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_level(false)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> Result<()> {
    let resolver = match &cli.label_map {
        Some(path) => StaticLabelMap::from_csv(path).map_err(PipelineError::Schema)?,
        None => StaticLabelMap::new(),
    };

    std::fs::create_dir_all(&cli.output_dir)?;
    let registry = PreProcessorRegistry::new();
    let input = registry
        .get(&cli.preprocessor)?
        .run(&cli.input, &cli.output_dir)?;

    let mut config = RunConfig::new(input, &cli.output_dir, &cli.config_dir, &cli.ontology);
    config.chunk_size = cli.chunk_size;
    config.split_column = cli.split_column.clone();
    config.drop_invalid = cli.drop_invalid;
    config.num_workers = cli.num_workers;
    if let (Some(classpath), Some(config_file)) = (&cli.reasoner_classpath, &cli.reasoner_config) {
        config.reasoner = Some(ReasonerConfig {
            classpath: classpath.clone(),
            config_file: config_file.clone(),
        });
    }
    if let Some(command) = &cli.extract_command {
        let mut words = command.split_whitespace().map(str::to_string);
        if let Some(program) = words.next() {
            config.extract = Some(ExtractConfig {
                program,
                args: words.collect(),
            });
        }
    }

    let summary = Pipeline::new(config).run(&resolver)?;

    println!(
        "{} {} batches → {} triples files under {}",
        "done:".green().bold(),
        summary.batches,
        summary.unreasoned.len(),
        cli.output_dir.display()
    );
    if !summary.reasoned.is_empty() {
        println!("  reasoned: {} files", summary.reasoned.len());
    }
    if !summary.extracted.is_empty() {
        println!("  extracted: {} files", summary.extracted.len());
    }
    Ok(())
}

/// Print the error and exit non-zero. Aborted runs already carry the
/// invalid-data sink path in their message.
fn exit_with_error(err: PipelineError) -> ! {
    eprintln!("{} {err}", "error:".red().bold());
    process::exit(EXIT_ERROR)
}
