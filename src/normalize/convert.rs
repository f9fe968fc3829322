//! Column-wise type inference and best-effort conversion.
//!
//! Scans a record set column by column, infers the dominant scalar type of
//! each column, then rewrites values toward that type. Conversion failures
//! keep the original value; nulls, arrays, and objects always pass through
//! untouched. The pass is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{Record, RecordSet};

static NUMERIC_STRING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?([eE][+-]?\d+)?$").unwrap());

/// Target scalar type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Int,
    Float,
    Bool,
    Str,
}

fn is_numeric_string(s: &str) -> bool {
    NUMERIC_STRING_REGEX.is_match(s.trim())
}

/// Infer the target type of one column from its convertible values.
///
/// Nulls, arrays, and objects are skipped before the call. A single
/// observed primitive type wins outright; an empty column falls back to
/// string; a mixture of ints, floats, and numeric-looking strings converges
/// on float; any other mixture stays string.
fn infer_column_type(values: &[&Value]) -> ColumnType {
    let mut ints = 0usize;
    let mut floats = 0usize;
    let mut bools = 0usize;
    let mut strings = 0usize;
    let mut numeric_strings = 0usize;

    for value in values {
        match value {
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    ints += 1;
                } else {
                    floats += 1;
                }
            }
            Value::Bool(_) => bools += 1,
            Value::String(s) => {
                strings += 1;
                if is_numeric_string(s) {
                    numeric_strings += 1;
                }
            }
            _ => {}
        }
    }

    let total = ints + floats + bools + strings;
    if total == 0 {
        return ColumnType::Str;
    }

    match (ints, floats, bools, strings) {
        (n, 0, 0, 0) if n == total => ColumnType::Int,
        (0, n, 0, 0) if n == total => ColumnType::Float,
        (0, 0, n, 0) if n == total => ColumnType::Bool,
        (0, 0, 0, n) if n == total => ColumnType::Str,
        _ => {
            // Mixture: only ints, floats, and numeric-looking strings
            // converge on float
            if bools == 0 && numeric_strings == strings {
                ColumnType::Float
            } else {
                ColumnType::Str
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Convert one value toward the column's target type, keeping the original
/// on any failure. Nulls, arrays, and objects are never converted.
fn convert_value(value: Value, target: ColumnType) -> Value {
    if value.is_null() || value.is_array() || value.is_object() {
        return value;
    }

    match target {
        ColumnType::Int => match scalar_to_string(&value).trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Value::from(f.trunc() as i64),
            _ => value,
        },
        ColumnType::Float => match scalar_to_string(&value).trim().parse::<f64>() {
            Ok(f) => serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(value),
            Err(_) => value,
        },
        ColumnType::Bool => {
            if value.is_boolean() {
                value
            } else {
                let s = scalar_to_string(&value).to_lowercase();
                Value::Bool(matches!(s.as_str(), "true" | "1" | "yes" | "on"))
            }
        }
        ColumnType::Str => {
            if value.is_string() {
                value
            } else {
                Value::String(scalar_to_string(&value))
            }
        }
    }
}

/// Infer each column's dominant type across the whole record set and
/// rewrite every value toward it. Takes ownership and returns the converted
/// records; running the pass twice yields the same output as running it
/// once.
pub fn infer_and_convert_types(records: RecordSet) -> RecordSet {
    let columns = crate::stats::columns(&records);

    let mut column_types = Vec::with_capacity(columns.len());
    for column in &columns {
        let values: Vec<&Value> = records
            .iter()
            .filter_map(|record| record.get(column))
            .filter(|v| !v.is_null() && !v.is_array() && !v.is_object())
            .collect();
        column_types.push((column.clone(), infer_column_type(&values)));
    }

    let lookup: std::collections::HashMap<&str, ColumnType> = column_types
        .iter()
        .map(|(name, ty)| (name.as_str(), *ty))
        .collect();

    records
        .into_iter()
        .map(|record| {
            let mut converted = Record::new();
            for (key, value) in record {
                let target = lookup.get(key.as_str()).copied().unwrap_or(ColumnType::Str);
                converted.insert(key, convert_value(value, target));
            }
            converted
        })
        .collect()
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

    #[test]
    fn test_uniform_int_column_stays_int() {
        let records = records_from(json!([{"n": 1}, {"n": 2}]));
        let converted = infer_and_convert_types(records);
        assert_eq!(converted[0]["n"], json!(1));
        assert_eq!(converted[1]["n"], json!(2));
    }

    #[test]
    fn test_numeric_mixture_converges_on_float() {
        let records = records_from(json!([{"n": 1}, {"n": 2.5}, {"n": "3"}]));
        let converted = infer_and_convert_types(records);
        assert_eq!(converted[0]["n"], json!(1.0));
        assert_eq!(converted[1]["n"], json!(2.5));
        assert_eq!(converted[2]["n"], json!(3.0));
    }

    #[test]
    fn test_non_numeric_mixture_becomes_strings() {
        let records = records_from(json!([{"v": 1}, {"v": "abc"}]));
        let converted = infer_and_convert_types(records);
        assert_eq!(converted[0]["v"], json!("1"));
        assert_eq!(converted[1]["v"], json!("abc"));
    }

    #[test]
    fn test_bool_mixture_keeps_strings() {
        // Booleans never take part in the numeric mixture
        let records = records_from(json!([{"v": true}, {"v": "1"}]));
        let converted = infer_and_convert_types(records);
        assert_eq!(converted[0]["v"], json!("true"));
        assert_eq!(converted[1]["v"], json!("1"));
    }

    #[test]
    fn test_uniform_bool_column() {
        let records = records_from(json!([{"flag": true}, {"flag": false}]));
        let converted = infer_and_convert_types(records);
        assert_eq!(converted[0]["flag"], json!(true));
        assert_eq!(converted[1]["flag"], json!(false));
    }

    #[test]
    fn test_nulls_arrays_objects_pass_through() {
        let records = records_from(json!([
            {"v": 1, "extra": null},
            {"v": 2, "extra": [1, 2]},
            {"v": 3, "extra": {"a": true}}
        ]));
        let converted = infer_and_convert_types(records);
        assert_eq!(converted[0]["extra"], Value::Null);
        assert_eq!(converted[1]["extra"], json!([1, 2]));
        assert_eq!(converted[2]["extra"], json!({"a": true}));
        assert_eq!(converted[2]["v"], json!(3));
    }

    #[test]
    fn test_empty_and_all_null_columns_default_to_str() {
        let records = records_from(json!([{"v": null}, {"v": null}]));
        let converted = infer_and_convert_types(records);
        assert_eq!(converted[0]["v"], Value::Null);
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let records = records_from(json!([
            {"n": 1, "s": "x", "m": "2"},
            {"n": 2.5, "s": "y", "m": 3}
        ]));
        let once = infer_and_convert_types(records);
        let twice = infer_and_convert_types(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_numeric_string_detection() {
        assert!(is_numeric_string("42"));
        assert!(is_numeric_string("-3.5"));
        assert!(is_numeric_string("1e9"));
        assert!(is_numeric_string(" 7 "));
        assert!(!is_numeric_string("abc"));
        assert!(!is_numeric_string("1.2.3"));
        assert!(!is_numeric_string(""));
    }
}
