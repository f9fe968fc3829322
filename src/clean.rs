//! Structural cleaning passes over a record set.
//!
//! Three independent passes that compose in any order: whitespace trimming,
//! null removal, and duplicate elimination. The reference pipeline runs
//! trim -> drop_null -> drop_duplicates. All passes mutate in place.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::RecordSet;

/// Strip leading/trailing whitespace from every string reachable through
/// objects and arrays, at any depth.
pub fn trim(records: &mut RecordSet) {
    for record in records.iter_mut() {
        for value in record.values_mut() {
            trim_value(value);
        }
    }
}

fn trim_value(value: &mut Value) {
    match value {
        Value::String(s) => {
            if s.trim().len() != s.len() {
                let trimmed = s.trim().to_string();
                *s = trimmed;
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                trim_value(item);
            }
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                trim_value(v);
            }
        }
        _ => {}
    }
}

/// Remove every object key whose value is null and every null array
/// element, at any nesting depth, including the top level of each record.
pub fn drop_null(records: &mut RecordSet) {
    for record in records.iter_mut() {
        drop_null_in_map(record);
    }
}

fn drop_null_in_map(map: &mut Map<String, Value>) {
    map.retain(|_, v| !v.is_null());
    for value in map.values_mut() {
        drop_null_value(value);
    }
}

fn drop_null_value(value: &mut Value) {
    match value {
        Value::Object(map) => drop_null_in_map(map),
        Value::Array(items) => {
            items.retain(|item| !item.is_null());
            for item in items.iter_mut() {
                drop_null_value(item);
            }
        }
        _ => {}
    }
}

/// Drop exact duplicate records, keeping the first occurrence of each and
/// preserving the relative order of survivors. Records compare by a
/// canonical encoding with lexicographically sorted keys, so key order
/// within a record does not matter.
pub fn drop_duplicates(records: &mut RecordSet) {
    let mut seen = HashSet::new();
    records.retain(|record| {
        let mut key = String::new();
        write_canonical(&Value::Object(record.clone()), &mut key);
        seen.insert(key)
    });
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key).unwrap_or_default());
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar).unwrap_or_default()),
    }
}

/// Rename a top-level key across all records, keeping each record's key
/// order. If the new name already exists in a record, the renamed value
/// wins.
pub fn rename_key(records: &mut RecordSet, old: &str, new: &str) {
    if old == new {
        return;
    }
    for record in records.iter_mut() {
        if !record.contains_key(old) {
            continue;
        }
        let mut renamed = Map::with_capacity(record.len());
        for (key, value) in std::mem::take(record) {
            if key == old {
                renamed.insert(new.to_string(), value);
            } else if key != new {
                renamed.insert(key, value);
            }
        }
        *record = renamed;
    }
}
