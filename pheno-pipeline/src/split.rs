//! Batch planning.
//!
//! Turns the whole normalized input into named, bounded batches: either
//! fixed-size chunks of the full input, or partitions keyed by a split
//! column's value, each partition itself chunked. Batch names become the
//! unreasoned output file stems.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use pheno_tabular::{RecordBatch, TabularError, Value};

use crate::error::Result;

/// A batch plus the output name it writes under.
#[derive(Debug)]
pub struct NamedBatch {
    pub name: String,
    pub batch: RecordBatch,
}

/// Plan the batches for one run.
///
/// Without a split column, chunks are named `data_1`, `data_2`, ... With one,
/// rows are partitioned by that column's rendered value (partitions ordered by
/// first appearance, blank values grouped under `unknown`) and each partition
/// is chunked as `<value>_1`, `<value>_2`, ...
pub fn plan_batches(
    input: RecordBatch,
    split_column: Option<&str>,
    chunk_size: usize,
) -> Result<Vec<NamedBatch>> {
    match split_column {
        None => Ok(name_chunks("data", input.into_chunks(chunk_size))),
        Some(column) => {
            let mut batches = Vec::new();
            for (key, partition) in partition_by(input, column)? {
                batches.extend(name_chunks(&key, partition.into_chunks(chunk_size)));
            }
            Ok(batches)
        }
    }
}

fn name_chunks(stem: &str, chunks: Vec<RecordBatch>) -> Vec<NamedBatch> {
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, batch)| NamedBatch {
            name: format!("{stem}_{}", i + 1),
            batch,
        })
        .collect()
}

/// Partition rows by the split column's value, preserving row order within
/// each partition and partition order by first appearance.
fn partition_by(input: RecordBatch, column: &str) -> Result<Vec<(String, RecordBatch)>> {
    let col = input
        .schema
        .index_of(column)
        .ok_or_else(|| TabularError::MissingColumn(column.to_string()))?;
    let schema = Arc::clone(&input.schema);

    let mut order: Vec<String> = Vec::new();
    let mut groups: FxHashMap<String, Vec<Vec<Value>>> = FxHashMap::default();

    for row in input.into_rows() {
        let key = match &row[col] {
            Value::Null => "unknown".to_string(),
            value => sanitize_stem(&value.to_string()),
        };
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(row);
    }

    order
        .into_iter()
        .map(|key| {
            let rows = groups.remove(&key).expect("key recorded on first sight");
            let batch = RecordBatch::new(Arc::clone(&schema), rows)?;
            Ok((key, batch))
        })
        .collect()
}

/// Split-column values become file stems; path separators and whitespace are
/// replaced.
fn sanitize_stem(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '/' | '\\' | ' ' | '\t' => '_',
            c => c,
        })
        .collect()
}
