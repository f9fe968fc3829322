//! High-level facade: one call from a file path (or parsed value) to an
//! analyzable table.
//!
//! `JsonTable` sequences the full pipeline: parse, detect the top-level
//! shape, normalize unstructured documents into records, run the
//! configured conversion and cleaning passes, and hand the result to an
//! [`Analyzer`]. Tabular documents (array-of-objects roots) skip
//! normalization entirely.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::analyzer::Analyzer;
use crate::clean;
use crate::error::Result;
use crate::loader;
use crate::normalize::convert::infer_and_convert_types;
use crate::normalize::detect::{detect, DetectedFormat};
use crate::normalize::strategies::{normalize, StructureInfo};
use crate::stats::ColumnStats;
use crate::{Record, RecordSet};

/// Which pipeline passes the facade runs after normalization.
///
/// The detection heuristics themselves are fixed; these switches only
/// control the optional post-processing.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Infer per-column types and convert values toward them.
    pub convert_types: bool,
    /// Strip leading/trailing whitespace from every string.
    pub trim: bool,
    /// Remove null object keys and null array elements at every depth.
    pub drop_null: bool,
    /// Remove exact duplicate records, keeping first occurrences.
    pub drop_duplicates: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            convert_types: true,
            trim: true,
            drop_null: true,
            drop_duplicates: true,
        }
    }
}

pub struct JsonTable {
    format: DetectedFormat,
    structure: StructureInfo,
    analyzer: Analyzer,
}

impl JsonTable {
    /// Load a JSON file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, TableOptions::default())
    }

    /// Load a JSON file, choosing which pipeline passes to run.
    pub fn open_with<P: AsRef<Path>>(path: P, options: TableOptions) -> Result<Self> {
        let value = loader::load_value(path)?;
        Ok(Self::from_value(value, options))
    }

    /// Build a table from an already-parsed document. Never fails: every
    /// shape detects to one of the five formats and every format
    /// normalizes.
    pub fn from_value(value: Value, options: TableOptions) -> Self {
        let format = detect(&value);
        let structure = StructureInfo::new(&value, format);
        let records = Self::run_passes(normalize(value, format), &options);

        JsonTable {
            format,
            structure: structure.with_records(&records),
            analyzer: Analyzer::new(records),
        }
    }

    /// Build a table directly from records that are already flat, skipping
    /// parse and normalization.
    pub fn from_records(records: RecordSet, options: TableOptions) -> Self {
        let records = Self::run_passes(records, &options);
        let structure =
            StructureInfo::new(&Value::Array(Vec::new()), DetectedFormat::Array).with_records(&records);

        JsonTable {
            format: DetectedFormat::Array,
            structure,
            analyzer: Analyzer::new(records),
        }
    }

    fn run_passes(records: RecordSet, options: &TableOptions) -> RecordSet {
        let mut records = if options.convert_types {
            infer_and_convert_types(records)
        } else {
            records
        };
        if options.trim {
            clean::trim(&mut records);
        }
        if options.drop_null {
            clean::drop_null(&mut records);
        }
        if options.drop_duplicates {
            clean::drop_duplicates(&mut records);
        }
        records
    }

    pub fn format(&self) -> DetectedFormat {
        self.format
    }

    /// Report of the raw document's structure and the normalized shape.
    pub fn structure(&self) -> &StructureInfo {
        &self.structure
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn shape(&self) -> (usize, usize) {
        self.analyzer.shape()
    }

    pub fn len(&self) -> usize {
        self.analyzer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzer.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        self.analyzer.columns()
    }

    pub fn records(&self) -> &RecordSet {
        self.analyzer.records()
    }

    pub fn head(&self, n: usize) -> &[Record] {
        self.analyzer.head(n)
    }

    pub fn tail(&self, n: usize) -> &[Record] {
        self.analyzer.tail(n)
    }

    pub fn stats(&self) -> BTreeMap<String, ColumnStats> {
        self.analyzer.stats()
    }

    pub fn filter(&self, column: &str, value: &Value) -> Result<RecordSet> {
        self.analyzer.filter_by_value(column, value)
    }

    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<RecordSet> {
        self.analyzer.select(columns)
    }

    pub fn sort_by(&self, column: &str, ascending: bool) -> Result<RecordSet> {
        self.analyzer.sort_by(column, ascending)
    }

    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.analyzer.to_csv(path)
    }

    pub fn to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.analyzer.to_json(path)
    }

    /// Dataset banner: row/column counts and the column names.
    pub fn info(&self) -> String {
        let (rows, cols) = self.shape();
        let mut out = Vec::new();
        out.push("=".repeat(60));
        out.push("Dataset info".to_string());
        out.push("=".repeat(60));
        out.push(format!("Format: {}", self.format));
        out.push(format!("Rows: {}", rows));
        out.push(format!("Columns: {}", cols));
        out.push(String::new());
        out.push("Column names:".to_string());
        for (i, column) in self.columns().iter().enumerate() {
            out.push(format!("  {}. {}", i + 1, column));
        }
        out.push("=".repeat(60));
        out.join("\n")
    }

    /// Full summary: shape plus per-column statistics, formatted for
    /// terminal output.
    pub fn summary(&self) -> String {
        let (rows, cols) = self.shape();
        let mut out = Vec::new();
        out.push("=".repeat(60));
        out.push("Summary".to_string());
        out.push("=".repeat(60));
        out.push(format!("Rows: {}, Columns: {}", rows, cols));
        out.push(String::new());
        out.push("Statistics:".to_string());

        for (column, stats) in self.stats() {
            out.push(String::new());
            out.push(format!("{}:", column));
            for line in stats.render_lines() {
                out.push(format!("  {}", line));
            }
        }

        out.push("=".repeat(60));
        out.join("\n")
    }
}
