//! Cross-batch uniqueness state.
//!
//! During one pipeline run, multiple workers validate batches concurrently.
//! UniqueValue rules must hold across the whole input, not per batch, so the
//! seen-value sets live here, shared by handle across workers.
//!
//! Contention is low because:
//! - Different unique columns have different sets (different `Mutex`)
//! - Each batch takes a column's lock once, not once per row

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::{FxHashMap, FxHashSet};

use pheno_schema::{Rule, RuleKind};

type ColumnSets = FxHashMap<String, Arc<Mutex<FxHashSet<String>>>>;

/// Process-wide set of values already seen per unique column.
///
/// Constructed fresh at run start and discarded at run end; never reused
/// across runs.
pub struct UniquenessTracker {
    columns: RwLock<ColumnSets>,
}

impl UniquenessTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            columns: RwLock::new(FxHashMap::default()),
        }
    }

    /// Create a tracker with a set pre-registered for every column named by a
    /// UniqueValue rule.
    pub fn for_rules(rules: &[Rule]) -> Self {
        let tracker = Self::new();
        {
            let mut columns = tracker.columns.write();
            for rule in rules.iter().filter(|r| r.kind == RuleKind::UniqueValue) {
                for col in &rule.columns {
                    columns
                        .entry(col.clone())
                        .or_insert_with(|| Arc::new(Mutex::new(FxHashSet::default())));
                }
            }
        }
        tracker
    }

    /// Check a batch's values against the global set for `column` and extend
    /// the set with them, indivisibly.
    ///
    /// Returns the values that were already present (cross-batch duplicates).
    /// The check and the insert happen under one lock acquisition, so two
    /// concurrent batches sharing a value cannot both see it as fresh.
    pub fn check_and_insert(
        &self,
        column: &str,
        values: impl IntoIterator<Item = String>,
    ) -> Vec<String> {
        let set = self.get_or_create(column);
        let mut seen = set.lock();

        let mut duplicates = Vec::new();
        for value in values {
            if !seen.insert(value.clone()) {
                duplicates.push(value);
            }
        }
        duplicates
    }

    /// Number of values recorded for `column`.
    pub fn seen_count(&self, column: &str) -> usize {
        self.columns
            .read()
            .get(column)
            .map_or(0, |set| set.lock().len())
    }

    fn get_or_create(&self, column: &str) -> Arc<Mutex<FxHashSet<String>>> {
        // Fast path: read lock
        {
            let columns = self.columns.read();
            if let Some(set) = columns.get(column) {
                return Arc::clone(set);
            }
        }
        // Slow path: write lock with double-check
        let mut columns = self.columns.write();
        Arc::clone(
            columns
                .entry(column.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(FxHashSet::default()))),
        )
    }
}

impl Default for UniquenessTracker {
    fn default() -> Self {
        Self::new()
    }
}
