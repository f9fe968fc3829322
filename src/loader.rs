//! Document loading: file bytes to a parsed value tree.
//!
//! Parsing goes through simd-json into a `serde_json::Value`, so everything
//! downstream works on the ordinary serde data model. The strict variant
//! additionally enforces an array-of-objects root for callers that only
//! accept tabular input.

use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::normalize::detect::json_type_name;
use crate::RecordSet;

/// Read and parse a JSON document from `path`.
///
/// Accepts any root shape. Fails with [`Error::Io`] if the file cannot be
/// read and [`Error::MalformedDocument`] if the bytes are not valid JSON.
pub fn load_value<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let mut bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    simd_json::serde::from_slice(&mut bytes).map_err(|_| Error::MalformedDocument {
        path: path.to_path_buf(),
    })
}

/// Read a JSON document that must be an array of objects, yielding it
/// directly as records.
///
/// This is the strict tabular path; unstructured documents fail with
/// [`Error::InvalidRoot`] and should go through detection + normalization
/// instead.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<RecordSet> {
    let path = path.as_ref();
    let value = load_value(path)?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(Error::InvalidRoot {
                path: path.to_path_buf(),
                found: json_type_name(&other),
            })
        }
    };

    let mut records = RecordSet::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(map) => records.push(map),
            other => {
                return Err(Error::InvalidRoot {
                    path: path.to_path_buf(),
                    found: json_type_name(&other),
                })
            }
        }
    }
    Ok(records)
}
