//! Batch orchestration for the phenology triplification pipeline.
//!
//! Plans a run (chunking or split-column partitioning), fans validate and
//! triplify out across a worker pool with shared uniqueness state, writes
//! per-batch unreasoned triples files, and drives the external reasoner and
//! CSV-extraction collaborators over them.

pub mod config;
pub mod error;
pub mod external;
pub mod preprocess;
pub mod run;
pub mod split;

pub use config::RunConfig;
pub use error::{PipelineError, Result};
pub use run::{Pipeline, RunSummary};
