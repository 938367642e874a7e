//! The rule engine.
//!
//! Rules run in declaration order (the synthesized default vocabulary rule
//! last). Each rule accumulates violating row indices into one deduplicated
//! batch-level invalid set; after all rules run, flagged rows are appended to
//! the invalid-data sink once each, in ascending row order, with their values
//! as they appeared before numeric coercion.

use std::collections::BTreeSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use pheno_schema::{ProjectSchema, Rule, RuleKind, Severity};
use pheno_tabular::{RecordBatch, TabularError, Value};

use crate::error::{Result, ValidateError};
use crate::sink::InvalidRowSink;
use crate::tracker::UniquenessTracker;

/// Integer with optional trailing `.0`: accepts `120`, `-7`, `5.0`.
static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+(\.0+)?$").expect("valid regex"));

/// Decimal number: accepts `13`, `13.0`, `-12.99`.
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?$").expect("valid regex"));

/// Applies the configured rules to record batches.
///
/// One validator serves all workers of a run: the schema is read-only, and
/// the tracker and sink are internally synchronized.
pub struct Validator {
    schema: Arc<ProjectSchema>,
    tracker: Arc<UniquenessTracker>,
    sink: Arc<InvalidRowSink>,
    drop_invalid: bool,
}

impl Validator {
    /// Create a validator over a loaded schema and the run's shared state.
    pub fn new(
        schema: Arc<ProjectSchema>,
        tracker: Arc<UniquenessTracker>,
        sink: Arc<InvalidRowSink>,
        drop_invalid: bool,
    ) -> Self {
        Self {
            schema,
            tracker,
            sink,
            drop_invalid,
        }
    }

    /// Validate a batch in place.
    ///
    /// Returns `Ok(true)` if the batch is usable: when dropping invalid rows,
    /// at least one row survived; otherwise, no error-level violation
    /// occurred (warnings never block). A batch missing a configured header
    /// column fails fatally instead — that is malformed input, not bad data.
    pub fn validate(&self, batch: &mut RecordBatch) -> Result<bool> {
        batch.require_columns(self.schema.headers())?;

        // Verbatim snapshot for the sink, taken before coercing rules mutate
        // cell values.
        let originals = batch.render_all_rows();

        let mut invalid: BTreeSet<usize> = BTreeSet::new();
        let mut error_violation = false;

        for rule in self.schema.rules() {
            let flagged = self.apply_rule(rule, batch)?;
            if flagged.is_empty() {
                continue;
            }
            if rule.level == Severity::Error && !self.drop_invalid {
                error_violation = true;
            }
            invalid.extend(flagged);
        }

        if !invalid.is_empty() {
            let rows: Vec<Vec<String>> = invalid
                .iter()
                .filter_map(|&i| originals.get(i).cloned())
                .collect();
            self.sink.append(&rows)?;

            if self.drop_invalid {
                batch.remove_rows(&invalid);
            }
        }

        if self.drop_invalid {
            Ok(!batch.is_empty())
        } else {
            Ok(!error_violation)
        }
    }

    fn apply_rule(&self, rule: &Rule, batch: &mut RecordBatch) -> Result<Vec<usize>> {
        match rule.kind {
            RuleKind::RequiredValue => self.required_value(rule, batch),
            RuleKind::UniqueValue => self.unique_value(rule, batch),
            RuleKind::ControlledVocabulary => self.controlled_vocab(rule, batch),
            RuleKind::Integer => self.integer(rule, batch),
            RuleKind::Float => self.float(rule, batch),
        }
    }

    fn column_index(&self, batch: &RecordBatch, column: &str) -> Result<usize> {
        batch
            .schema
            .index_of(column)
            .ok_or_else(|| ValidateError::Tabular(TabularError::MissingColumn(column.to_string())))
    }

    fn required_value(&self, rule: &Rule, batch: &RecordBatch) -> Result<Vec<usize>> {
        let mut flagged = Vec::new();
        for column in &rule.columns {
            let col = self.column_index(batch, column)?;
            let before = flagged.len();
            for row in 0..batch.num_rows() {
                if batch.value(row, col).is_none_or_null() {
                    flagged.push(row);
                }
            }
            if flagged.len() > before {
                self.log(
                    rule.level,
                    &format!("Value missing in required column `{column}`"),
                );
            }
        }
        Ok(flagged)
    }

    fn unique_value(&self, rule: &Rule, batch: &RecordBatch) -> Result<Vec<usize>> {
        let mut flagged = Vec::new();
        for column in &rule.columns {
            let col = self.column_index(batch, column)?;

            // Group rows by value within the batch.
            let mut groups: std::collections::HashMap<String, Vec<usize>> =
                std::collections::HashMap::new();
            for row in 0..batch.num_rows() {
                if let Some(v) = batch.value(row, col) {
                    if !v.is_null() {
                        groups.entry(v.to_string()).or_default().push(row);
                    }
                }
            }

            // Values already seen by other batches: one critical section per
            // column, check and insert together.
            let cross_dups =
                self.tracker
                    .check_and_insert(column, groups.keys().cloned().collect::<Vec<_>>());

            let mut dup_values: Vec<String> = groups
                .iter()
                .filter(|(_, rows)| rows.len() > 1)
                .map(|(v, _)| v.clone())
                .chain(cross_dups)
                .collect();
            dup_values.sort();
            dup_values.dedup();

            if dup_values.is_empty() {
                continue;
            }
            for value in &dup_values {
                if let Some(rows) = groups.get(value) {
                    flagged.extend(rows.iter().copied());
                }
            }
            self.log(
                rule.level,
                &format!(
                    "Duplicate values [{}] in column `{column}`",
                    dup_values.join(", ")
                ),
            );
        }
        Ok(flagged)
    }

    fn controlled_vocab(&self, rule: &Rule, batch: &RecordBatch) -> Result<Vec<usize>> {
        let list_name = rule.list.as_deref().unwrap_or_default();
        let list = self
            .schema
            .list(list_name)
            .ok_or_else(|| ValidateError::MissingList(list_name.to_string()))?;

        let mut flagged = Vec::new();
        for column in &rule.columns {
            let col = self.column_index(batch, column)?;
            for row in 0..batch.num_rows() {
                let value = batch
                    .value(row, col)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                if !list.contains(&value) {
                    flagged.push(row);
                    self.log(
                        rule.level,
                        &format!(
                            "Value `{value}` in column `{column}` is not in the controlled \
                             vocabulary list `{list_name}`"
                        ),
                    );
                }
            }
        }
        Ok(flagged)
    }

    fn integer(&self, rule: &Rule, batch: &mut RecordBatch) -> Result<Vec<usize>> {
        let mut flagged = Vec::new();
        for column in &rule.columns {
            let col = self.column_index(batch, column)?;
            for row in 0..batch.num_rows() {
                let coerced = match batch.value(row, col) {
                    None | Some(Value::Null) | Some(Value::Int(_)) => continue,
                    Some(Value::Float(f)) if f.fract() == 0.0 => Value::Int(*f as i64),
                    Some(Value::Str(s)) if INT_RE.is_match(s) => {
                        // Parse through f64 so `5.0` coerces to 5 without
                        // rounding anything else.
                        Value::Int(s.parse::<f64>().expect("matched integer pattern") as i64)
                    }
                    Some(other) => {
                        self.log(
                            rule.level,
                            &format!("Value `{other}` in column `{column}` is not an integer"),
                        );
                        flagged.push(row);
                        continue;
                    }
                };
                batch.set_value(row, col, coerced);
            }
        }
        Ok(flagged)
    }

    fn float(&self, rule: &Rule, batch: &mut RecordBatch) -> Result<Vec<usize>> {
        let mut flagged = Vec::new();
        for column in &rule.columns {
            let col = self.column_index(batch, column)?;
            for row in 0..batch.num_rows() {
                let coerced = match batch.value(row, col) {
                    None | Some(Value::Null) | Some(Value::Float(_)) => continue,
                    Some(Value::Int(i)) => Value::Float(*i as f64),
                    Some(Value::Str(s)) if FLOAT_RE.is_match(s) => {
                        Value::Float(s.parse::<f64>().expect("matched float pattern"))
                    }
                    Some(other) => {
                        self.log(
                            rule.level,
                            &format!("Value `{other}` in column `{column}` is not a float"),
                        );
                        flagged.push(row);
                        continue;
                    }
                };
                batch.set_value(row, col, coerced);
            }
        }
        Ok(flagged)
    }

    /// Violation lines render as `{LEVEL}: {message}` with LEVEL spelled
    /// `ERROR` or `WARNING`; the subscriber must not add its own level token.
    fn log(&self, level: Severity, message: &str) {
        match level {
            Severity::Error => tracing::error!("{level}: {message}"),
            Severity::Warning => tracing::warn!("{level}: {message}"),
        }
    }
}

/// Cell access helper: absent cells count as null.
trait OptionValueExt {
    fn is_none_or_null(&self) -> bool;
}

impl OptionValueExt for Option<&Value> {
    fn is_none_or_null(&self) -> bool {
        self.map_or(true, |v| v.is_null())
    }
}
