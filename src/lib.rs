//! # jsontab - JSON tabularization toolkit
//!
//! A library for loading JSON documents of unknown shape and turning them
//! into flat, analyzable tables. It detects whether a document is already
//! tabular (an array of objects) or unstructured (nested objects,
//! COCO-style annotation bundles, dict-of-lists), flattens the
//! unstructured cases into records, and offers cleaning passes and
//! per-column statistics on the result.
//!
//! ## Modules
//!
//! - **normalize**: shape detection, flattening strategies, type conversion
//! - **clean**: trim / null-drop / duplicate-drop passes
//! - **stats**: per-column descriptive statistics
//! - **analyzer** / **table**: read-only analysis facades
//!
//! ## Quick start
//!
//! ```rust
//! use jsontab::{JsonTable, TableOptions};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "users": [
//!         {"id": 1, "name": "alice"},
//!         {"id": 2, "name": "bob"}
//!     ],
//!     "admins": [
//!         {"id": 3, "name": "carol"}
//!     ]
//! });
//!
//! let table = JsonTable::from_value(doc, TableOptions::default());
//! assert_eq!(table.shape(), (3, 3));
//! assert_eq!(table.columns(), ["id", "name", "source"]);
//! ```
//!
//! ### Working with the pieces directly
//!
//! ```rust
//! use jsontab::normalize::{detect, normalize, DetectedFormat};
//! use serde_json::json;
//!
//! let doc = json!([{"id": 1}, {"id": 2}]);
//! let format = detect(&doc);
//! assert_eq!(format, DetectedFormat::Array);
//!
//! let records = normalize(doc, format);
//! assert_eq!(records.len(), 2);
//! ```

use std::path::Path;

use serde_json::{Map, Value};

pub mod analyzer;
pub mod clean;
pub mod error;
pub mod export;
pub mod loader;
pub mod normalize;
pub mod stats;
pub mod table;

// Re-export the main surface for convenience
pub use analyzer::Analyzer;
pub use error::{Error, Result};
pub use loader::{load_records, load_value};
pub use normalize::{detect, infer_and_convert_types, normalize, DetectedFormat, StructureInfo};
pub use stats::{columns, stats, ColumnStats};
pub use table::{JsonTable, TableOptions};

/// One flat row: column name to value, insertion-ordered.
pub type Record = Map<String, Value>;

/// An ordered sequence of records, the unit every stage passes around.
pub type RecordSet = Vec<Record>;

/// Main entry point: load a JSON file and run the full pipeline with
/// default options.
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<JsonTable> {
    JsonTable::open(path)
}
