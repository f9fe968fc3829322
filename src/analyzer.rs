//! Read-only analysis over a cleaned record set.
//!
//! The analyzer owns its records; column discovery happens once at
//! construction, everything else is computed per call. Operations that
//! name a column fail with [`Error::ColumnNotFound`] when no record
//! carries it.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::stats::{self, display_string, ColumnStats};
use crate::{export, Record, RecordSet};

pub struct Analyzer {
    records: RecordSet,
    columns: Vec<String>,
}

impl Analyzer {
    /// Build an analyzer over an already-normalized, already-cleaned record
    /// set.
    pub fn new(records: RecordSet) -> Self {
        let columns = stats::columns(&records);
        Analyzer { records, columns }
    }

    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.columns.len())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All column names, sorted and de-duplicated.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    /// Consume the analyzer, returning the records.
    pub fn into_records(self) -> RecordSet {
        self.records
    }

    /// Per-column summary statistics.
    pub fn stats(&self) -> BTreeMap<String, ColumnStats> {
        stats::stats(&self.records)
    }

    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn tail(&self, n: usize) -> &[Record] {
        &self.records[self.records.len().saturating_sub(n)..]
    }

    fn ensure_column(&self, column: &str) -> Result<()> {
        if self.columns.iter().any(|c| c == column) {
            Ok(())
        } else {
            Err(Error::column_not_found(column, &self.columns))
        }
    }

    /// All records whose value under `column` equals `value`.
    pub fn filter_by_value(&self, column: &str, value: &Value) -> Result<RecordSet> {
        self.ensure_column(column)?;
        Ok(self
            .records
            .iter()
            .filter(|record| record.get(column) == Some(value))
            .cloned()
            .collect())
    }

    /// Project each record onto the requested columns, in the requested
    /// order. Keys a record does not carry come back as null.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<RecordSet> {
        for column in columns {
            self.ensure_column(column.as_ref())?;
        }

        Ok(self
            .records
            .iter()
            .map(|record| {
                let mut projected = Record::new();
                for column in columns {
                    let name = column.as_ref();
                    projected.insert(
                        name.to_string(),
                        record.get(name).cloned().unwrap_or(Value::Null),
                    );
                }
                projected
            })
            .collect())
    }

    /// Sorted copy of the records. When every record carries a numeric
    /// value for the column, ordering is numeric; otherwise values compare
    /// by their string form, with missing and null values sorting as empty
    /// strings. The sort is stable.
    pub fn sort_by(&self, column: &str, ascending: bool) -> Result<RecordSet> {
        self.ensure_column(column)?;

        let all_numeric = self
            .records
            .iter()
            .all(|record| matches!(record.get(column), Some(Value::Number(_))));

        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| {
            let ordering = if all_numeric {
                let x = number_key(a.get(column));
                let y = number_key(b.get(column));
                x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
            } else {
                string_key(a.get(column)).cmp(&string_key(b.get(column)))
            };
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
        Ok(sorted)
    }

    /// Export all records and columns to a CSV file.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::write_csv(&self.records, &self.columns, path)
    }

    /// Export all records to a pretty-printed JSON file.
    pub fn to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::write_json(&self.records, path)
    }
}

fn number_key(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}

fn string_key(value: Option<&Value>) -> String {
    value.map(display_string).unwrap_or_default()
}
