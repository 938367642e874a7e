//! External reasoner and extraction collaborators.
//!
//! Both are opaque subprocesses: the pipeline hands each one an input path
//! and an output path, then checks the exit status and that the output file
//! actually appeared. Their internals (OWL inference, SPARQL extraction) are
//! out of scope here.

use std::path::Path;
use std::process::Command;

use crate::config::{ExtractConfig, ReasonerConfig};
use crate::error::{PipelineError, Result};

/// Runs the java OWL reasoner over one unreasoned triples file.
pub struct Reasoner {
    config: ReasonerConfig,
}

impl Reasoner {
    pub fn new(config: ReasonerConfig) -> Self {
        Self { config }
    }

    /// Reason `input` into `output`.
    pub fn reason(&self, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new("java");
        cmd.arg("-cp")
            .arg(&self.config.classpath)
            .arg("Main")
            .arg("-i")
            .arg(input)
            .arg("-o")
            .arg(output)
            .arg("-c")
            .arg(&self.config.config_file)
            .arg("inference_pipeline");

        tracing::debug!(input = %input.display(), "running reasoner");
        run_checked(cmd, output)?;
        tracing::info!("reasoned output at {}", output.display());
        Ok(())
    }
}

/// Runs the configured CSV-extraction command over one reasoned file.
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Extract `input` into `output`.
    pub fn extract(&self, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args).arg(input).arg(output);

        tracing::debug!(input = %input.display(), "running extraction");
        run_checked(cmd, output)?;
        tracing::info!("extracted output at {}", output.display());
        Ok(())
    }
}

/// Run a command; non-zero exit or a missing output file surfaces the command
/// line and the captured output.
fn run_checked(mut cmd: Command, expected_output: &Path) -> Result<()> {
    let rendered = render_command(&cmd);
    let output = cmd.output()?;

    if !output.status.success() || !expected_output.exists() {
        let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
        captured.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(PipelineError::ExternalTool {
            command: rendered,
            output: captured,
        });
    }
    Ok(())
}

fn render_command(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}
