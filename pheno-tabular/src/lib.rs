//! Record batch types for the phenology triplification pipeline.
//!
//! This crate provides the batch-of-rows model shared by the validator and
//! triplifier. Batches are the unit of parallel processing.
//!
//! # Design
//!
//! - **Row-major storage**: rules and triplification walk rows, not columns
//! - **Strongly typed values**: all cell access is through the `Value` enum
//! - **Name canonical**: column names are the canonical identifier for cells

pub mod batch;
pub mod error;

pub use batch::{BatchSchema, RecordBatch, Value};
pub use error::{Result, TabularError};
