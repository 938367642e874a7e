//! Provider preprocessor seam.
//!
//! Per-provider column mapping lives outside this core; providers plug in
//! through the [`PreProcessor`] trait and a registry keyed by project name,
//! resolved at startup. The built-in `passthrough` entry stages an
//! already-normalized CSV into the work directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Turns a provider's raw input into the single normalized CSV the pipeline
/// consumes.
pub trait PreProcessor: Send + Sync {
    /// Project name the preprocessor is registered under.
    fn name(&self) -> &str;

    /// Produce the normalized CSV under `work_dir` and return its path.
    fn run(&self, input: &Path, work_dir: &Path) -> Result<PathBuf>;
}

impl std::fmt::Debug for dyn PreProcessor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreProcessor")
            .field("name", &self.name())
            .finish()
    }
}

/// Copies input that is already normalized.
pub struct Passthrough;

impl PreProcessor for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn run(&self, input: &Path, work_dir: &Path) -> Result<PathBuf> {
        let file_name = input
            .file_name()
            .ok_or_else(|| PipelineError::Io(std::io::Error::other("input has no file name")))?;
        let staged = work_dir.join(file_name);
        if staged != input {
            fs::copy(input, &staged)?;
        }
        Ok(staged)
    }
}

/// Startup-resolved table of preprocessors by project name.
pub struct PreProcessorRegistry {
    table: HashMap<String, Box<dyn PreProcessor>>,
}

impl PreProcessorRegistry {
    /// A registry holding the built-in `passthrough` entry.
    pub fn new() -> Self {
        let mut registry = Self {
            table: HashMap::new(),
        };
        registry.register(Box::new(Passthrough));
        registry
    }

    /// Register a preprocessor under its own name, replacing any previous
    /// entry with that name.
    pub fn register(&mut self, preprocessor: Box<dyn PreProcessor>) {
        self.table
            .insert(preprocessor.name().to_string(), preprocessor);
    }

    /// Resolve a project name, failing with the unknown name.
    pub fn get(&self, name: &str) -> Result<&dyn PreProcessor> {
        self.table
            .get(name)
            .map(|p| p.as_ref())
            .ok_or_else(|| PipelineError::UnknownPreProcessor(name.to_string()))
    }
}

impl Default for PreProcessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_passthrough_stages_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in").join("data.csv");
        fs::create_dir_all(input.parent().unwrap()).unwrap();
        fs::write(&input, "record_id\n1\n").unwrap();
        let work = dir.path().join("work");
        fs::create_dir_all(&work).unwrap();

        let staged = Passthrough.run(&input, &work).unwrap();
        assert_eq!(staged, work.join("data.csv"));
        assert_eq!(fs::read_to_string(staged).unwrap(), "record_id\n1\n");
    }

    #[test]
    fn test_registry_resolves_by_name() {
        let registry = PreProcessorRegistry::new();
        assert!(registry.get("passthrough").is_ok());

        let err = registry.get("npn").unwrap_err();
        assert!(matches!(err, PipelineError::UnknownPreProcessor(n) if n == "npn"));
    }
}
