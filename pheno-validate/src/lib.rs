//! Rule-based data quality gate for the phenology pipeline.
//!
//! Applies the configured validation rules to a record batch, partitions rows
//! into valid/invalid sets with severity-leveled diagnostics, and maintains
//! exactly-once global uniqueness checks across batches processed by
//! independent workers.
//!
//! # Concurrency
//!
//! The [`UniquenessTracker`] is the only cross-worker synchronization point:
//! its check-then-insert is a single critical section per column, so if two
//! concurrent batches carry the same value in a unique column, at least one is
//! flagged. The [`InvalidRowSink`] serializes appends behind a mutex. Both are
//! constructed fresh per run and torn down at run end.

pub mod error;
pub mod sink;
pub mod tracker;
pub mod validator;

pub use error::{Result, ValidateError};
pub use sink::InvalidRowSink;
pub use tracker::UniquenessTracker;
pub use validator::Validator;
