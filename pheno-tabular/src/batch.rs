//! Row-major record batches.
//!
//! A `RecordBatch` holds a bounded slice of the normalized input CSV: an
//! ordered list of rows sharing one `BatchSchema`. Row order within a batch is
//! not semantically significant, but triple emission walks rows in insertion
//! order so output is reproducible for identical input.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::io::Read;
use std::sync::Arc;

use crate::error::{Result, TabularError};

/// A single cell value.
///
/// Raw CSV input arrives as `Str` (or `Null` for blank cells); Integer/Float
/// validation rules coerce matching cells to `Int`/`Float` in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent or blank cell.
    Null,
    /// Uncoerced string value.
    Str(String),
    /// Integer-coerced value.
    Int(i64),
    /// Float-coerced value.
    Float(f64),
}

impl Value {
    /// Parse a raw CSV field. Blank and whitespace-only fields are null.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Value::Null
        } else {
            Value::Str(trimmed.to_string())
        }
    }

    /// Whether this cell is null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The uncoerced string form, if this cell is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            // {:?} keeps the decimal point on whole floats (13.0, not 13),
            // which the triplifier relies on for xsd:float literals.
            Value::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// Ordered column list for a batch, with name lookup.
#[derive(Debug, Clone)]
pub struct BatchSchema {
    columns: Vec<String>,
    name_to_index: HashMap<String, usize>,
}

impl BatchSchema {
    /// Create a schema from an ordered column list.
    pub fn new(columns: Vec<String>) -> Self {
        let name_to_index = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self {
            columns,
            name_to_index,
        }
    }

    /// Get column index by name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// A bounded batch of input rows sharing one schema.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    /// Schema for this batch.
    pub schema: Arc<BatchSchema>,
    rows: Vec<Vec<Value>>,
}

impl RecordBatch {
    /// Create a batch from pre-built rows. Every row must match the schema
    /// width.
    pub fn new(schema: Arc<BatchSchema>, rows: Vec<Vec<Value>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != schema.num_columns() {
                return Err(TabularError::Schema(format!(
                    "Row {} has {} fields, schema has {} columns",
                    i,
                    row.len(),
                    schema.num_columns()
                )));
            }
        }
        Ok(Self { schema, rows })
    }

    /// Read an entire CSV stream (with a header row) into one batch.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let schema = Arc::new(BatchSchema::new(
            headers.iter().map(|h| h.to_string()).collect(),
        ));

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row: Vec<Value> = record.iter().map(Value::from_raw).collect();
            // Ragged records are padded/truncated so the batch stays rectangular.
            row.truncate(schema.num_columns());
            row.resize(schema.num_columns(), Value::Null);
            rows.push(row);
        }

        Ok(Self { schema, rows })
    }

    /// Number of rows in the batch.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Check if the batch has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by row index and column index.
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Get a cell by row index and column name.
    pub fn value_by_name(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.schema.index_of(column)?;
        self.value(row, col)
    }

    /// Replace a cell in place (used by coercing rules).
    pub fn set_value(&mut self, row: usize, col: usize, value: Value) {
        if let Some(r) = self.rows.get_mut(row) {
            if let Some(cell) = r.get_mut(col) {
                *cell = value;
            }
        }
    }

    /// Verify that every required column is present in this batch's schema.
    ///
    /// A missing column is malformed input, not a row-level violation, and
    /// must stop the run.
    pub fn require_columns(&self, required: &[String]) -> Result<()> {
        for col in required {
            if self.schema.index_of(col).is_none() {
                return Err(TabularError::MissingColumn(col.clone()));
            }
        }
        Ok(())
    }

    /// Render every row to strings, in order.
    pub fn render_all_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    /// Remove the given rows from the batch in place.
    pub fn remove_rows(&mut self, indices: &BTreeSet<usize>) {
        if indices.is_empty() {
            return;
        }
        let mut i = 0;
        self.rows.retain(|_| {
            let keep = !indices.contains(&i);
            i += 1;
            keep
        });
    }

    /// Consume the batch, yielding its rows.
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    /// Split this batch into chunks of at most `chunk_size` rows.
    pub fn into_chunks(self, chunk_size: usize) -> Vec<RecordBatch> {
        if chunk_size == 0 || self.rows.len() <= chunk_size {
            return vec![self];
        }
        let schema = self.schema;
        let mut rows = self.rows;
        let mut chunks = Vec::with_capacity(rows.len().div_ceil(chunk_size));
        while !rows.is_empty() {
            let rest = rows.split_off(rows.len().min(chunk_size));
            chunks.push(RecordBatch {
                schema: Arc::clone(&schema),
                rows,
            });
            rows = rest;
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> RecordBatch {
        let csv = "record_id,latitude,source\n1,-12.99,me\n2,,you\n3,40.1,\n";
        RecordBatch::from_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_from_csv() {
        let batch = sample_batch();
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.schema.columns(), &["record_id", "latitude", "source"]);
        assert_eq!(
            batch.value_by_name(0, "latitude"),
            Some(&Value::Str("-12.99".to_string()))
        );
        assert_eq!(batch.value_by_name(1, "latitude"), Some(&Value::Null));
        assert_eq!(batch.value_by_name(2, "source"), Some(&Value::Null));
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Str("me".into()).to_string(), "me");
        assert_eq!(Value::Int(120).to_string(), "120");
        // Whole floats keep the decimal point.
        assert_eq!(Value::Float(13.0).to_string(), "13.0");
        assert_eq!(Value::Float(-12.99).to_string(), "-12.99");
    }

    #[test]
    fn test_require_columns() {
        let batch = sample_batch();
        assert!(batch
            .require_columns(&["record_id".into(), "latitude".into()])
            .is_ok());

        let err = batch
            .require_columns(&["record_id".into(), "day_of_year".into()])
            .unwrap_err();
        assert!(matches!(err, TabularError::MissingColumn(c) if c == "day_of_year"));
    }

    #[test]
    fn test_remove_rows() {
        let mut batch = sample_batch();
        let drop: BTreeSet<usize> = [0, 2].into_iter().collect();
        batch.remove_rows(&drop);
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(
            batch.value_by_name(0, "record_id"),
            Some(&Value::Str("2".to_string()))
        );
    }

    #[test]
    fn test_into_chunks() {
        let batch = sample_batch();
        let chunks = batch.into_chunks(2);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].num_rows(), 2);
        assert_eq!(chunks[1].num_rows(), 1);
        assert_eq!(
            chunks[1].value_by_name(0, "record_id"),
            Some(&Value::Str("3".to_string()))
        );
    }

    #[test]
    fn test_short_rows_padded() {
        let csv = "a,b,c\n1,2\n";
        let batch = RecordBatch::from_csv(csv.as_bytes()).unwrap();
        assert_eq!(batch.value_by_name(0, "c"), Some(&Value::Null));
    }
}
