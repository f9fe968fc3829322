//! Error types for the jsontab library.
//!
//! The core transformations (detect, normalize, clean, stats) are total over
//! well-formed values and never fail; everything that can go wrong lives at
//! the edges: reading/parsing a document, strict tabular loading, looking up
//! a named column, and writing export files.

use std::path::PathBuf;
use thiserror::Error;

/// Library result type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be read or written.
    #[error("failed to read or write '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input bytes are not syntactically valid JSON.
    #[error("failed to decode JSON from '{}': check the file for syntax errors", .path.display())]
    MalformedDocument { path: PathBuf },

    /// The strict loader requires an array-of-objects root. The normalizer
    /// has no such restriction and accepts any shape.
    #[error(
        "JSON root in '{}' must be an array of objects, got {found}; \
         use JsonTable::open for unstructured documents",
        .path.display()
    )]
    InvalidRoot { path: PathBuf, found: &'static str },

    /// An operation referenced a column that no record contains.
    #[error("column '{column}' not found (available: {})", .available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// A CSV export failed mid-write.
    #[error("failed to write CSV to '{}'", .path.display())]
    CsvExport {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl Error {
    pub fn column_not_found(column: &str, available: &[String]) -> Self {
        Error::ColumnNotFound {
            column: column.to_string(),
            available: available.to_vec(),
        }
    }
}
