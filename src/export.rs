//! Output sinks: write a record set to CSV or pretty-printed JSON.
//!
//! Pure output, no round-trip contract: nested values are rendered as
//! compact JSON inside CSV cells, missing cells stay empty.

use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::RecordSet;

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => serde_json::to_string(nested).unwrap_or_default(),
    }
}

/// Write the records as CSV with one column per entry of `columns`, in that
/// order. Cells for keys a record does not carry are left empty.
pub fn write_csv<P: AsRef<Path>>(records: &RecordSet, columns: &[String], path: P) -> Result<()> {
    let path = path.as_ref();
    let to_export_error = |source: csv::Error| Error::CsvExport {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(to_export_error)?;
    writer.write_record(columns).map_err(to_export_error)?;

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| record.get(column).map(csv_cell).unwrap_or_default())
            .collect();
        writer.write_record(&row).map_err(to_export_error)?;
    }

    writer.flush().map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the records as a pretty-printed JSON array.
pub fn write_json<P: AsRef<Path>>(records: &RecordSet, path: P) -> Result<()> {
    let path = path.as_ref();
    let body = serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string());
    std::fs::write(path, body).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records_from(value: Value) -> RecordSet {
        match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(m) => Some(m),
                    _ => None,
                })
                .collect(),
            _ => unreachable!("test fixtures are arrays of objects"),
        }
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("jsontab_export_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_csv_shape_and_missing_cells() {
        let records = records_from(json!([
            {"a": 1, "b": "x"},
            {"a": 2, "tags": [1, 2]}
        ]));
        let columns = vec!["a".to_string(), "b".to_string(), "tags".to_string()];

        let path = temp_path("out.csv");
        write_csv(&records, &columns, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "a,b,tags");
        assert_eq!(lines[1], "1,x,");
        // Nested value is rendered as compact JSON, quoted by the writer
        assert_eq!(lines[2], "2,,\"[1,2]\"");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_json_round_trips_through_serde() {
        let records = records_from(json!([{"id": 1, "name": "a"}]));
        let path = temp_path("out.json");
        write_json(&records, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, json!([{"id": 1, "name": "a"}]));
        std::fs::remove_file(path).ok();
    }
}
