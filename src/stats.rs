//! Per-column descriptive statistics over a record set.
//!
//! Each column gets either a numeric summary (count, mean, std, min,
//! quartiles, max) or a categorical one (count, unique, top, freq),
//! depending on whether every present value is a number. Pure and
//! stateless: every call recomputes from the records it is given.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use serde_json::{Number, Value};

use crate::RecordSet;

/// Summary statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnStats {
    /// No non-null values present in any record.
    Empty { count: usize },
    /// Every present value is an int or float (booleans do not count).
    /// `mean` and `std` are rounded to two decimals; `min`, the quartiles,
    /// and `max` are the raw values picked by nearest-rank indexing.
    Numeric {
        count: usize,
        mean: f64,
        std: f64,
        min: Number,
        #[serde(rename = "25%")]
        p25: Number,
        #[serde(rename = "50%")]
        p50: Number,
        #[serde(rename = "75%")]
        p75: Number,
        max: Number,
    },
    /// At least one non-numeric value: values are counted by their string
    /// form. `top` is the most frequent string, first-seen winning ties.
    Categorical {
        count: usize,
        unique: usize,
        top: Option<String>,
        freq: usize,
    },
}

/// All keys appearing in any record: de-duplicated and lexicographically
/// sorted.
pub fn columns(records: &RecordSet) -> Vec<String> {
    let mut names = BTreeSet::new();
    for record in records {
        for key in record.keys() {
            names.insert(key.clone());
        }
    }
    names.into_iter().collect()
}

/// Compute statistics for every column in the record set.
///
/// A column's values are collected in record order, skipping records where
/// the key is absent or null. Never fails: a column that is missing
/// everywhere simply reports `count: 0`.
pub fn stats(records: &RecordSet) -> BTreeMap<String, ColumnStats> {
    let mut result = BTreeMap::new();
    for column in columns(records) {
        let values: Vec<&Value> = records
            .iter()
            .filter_map(|record| record.get(&column))
            .filter(|v| !v.is_null())
            .collect();
        result.insert(column, column_stats(&values));
    }
    result
}

fn column_stats(values: &[&Value]) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats::Empty { count: 0 };
    }

    let numbers: Option<Vec<&Number>> = values
        .iter()
        .map(|v| match v {
            Value::Number(n) => Some(n),
            _ => None,
        })
        .collect();

    match numbers {
        Some(numbers) => numeric_stats(numbers),
        None => categorical_stats(values),
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn numeric_stats(mut numbers: Vec<&Number>) -> ColumnStats {
    numbers.sort_by(|a, b| {
        let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
        a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
    });

    let count = numbers.len();
    let sum: f64 = numbers.iter().map(|n| n.as_f64().unwrap_or(0.0)).sum();
    let mean = sum / count as f64;
    let variance: f64 = numbers
        .iter()
        .map(|n| {
            let d = n.as_f64().unwrap_or(0.0) - mean;
            d * d
        })
        .sum::<f64>()
        / count as f64;

    // Nearest-rank percentile: index floor(count * p) into the sorted
    // values, no interpolation
    let rank = |p: f64| -> Number {
        let idx = ((count as f64 * p).floor() as usize).min(count - 1);
        numbers[idx].clone()
    };

    ColumnStats::Numeric {
        count,
        mean: round2(mean),
        std: round2(variance.sqrt()),
        min: numbers[0].clone(),
        p25: rank(0.25),
        p50: rank(0.50),
        p75: rank(0.75),
        max: numbers[count - 1].clone(),
    }
}

/// Stringified form of a value for categorical counting and display.
pub(crate) fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn categorical_stats(values: &[&Value]) -> ColumnStats {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for value in values {
        let key = display_string(value);
        match counts.get_mut(&key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key.clone(), 1);
                order.push(key);
            }
        }
    }

    let mut top = None;
    let mut freq = 0;
    for key in &order {
        let count = counts[key];
        if count > freq {
            top = Some(key.clone());
            freq = count;
        }
    }

    ColumnStats::Categorical {
        count: values.len(),
        unique: order.len(),
        top,
        freq,
    }
}

impl ColumnStats {
    /// Lines for the human-readable summary, in the order the fields are
    /// defined.
    pub fn render_lines(&self) -> Vec<String> {
        match self {
            ColumnStats::Empty { count } => vec![format!("count: {}", count)],
            ColumnStats::Numeric {
                count,
                mean,
                std,
                min,
                p25,
                p50,
                p75,
                max,
            } => vec![
                format!("count: {}", count),
                format!("mean: {}", mean),
                format!("std: {}", std),
                format!("min: {}", min),
                format!("25%: {}", p25),
                format!("50%: {}", p50),
                format!("75%: {}", p75),
                format!("max: {}", max),
            ],
            ColumnStats::Categorical {
                count,
                unique,
                top,
                freq,
            } => vec![
                format!("count: {}", count),
                format!("unique: {}", unique),
                format!("top: {}", top.as_deref().unwrap_or("-")),
                format!("freq: {}", freq),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serde_json::Value;

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
    fn test_numeric_column() {
        let records = records_from(json!([{"n": 1}, {"n": 2}, {"n": 3}, {"n": 4}]));
        let all = stats(&records);
        match &all["n"] {
            ColumnStats::Numeric {
                count,
                mean,
                std,
                min,
                p25,
                p50,
                p75,
                max,
            } => {
                assert_eq!(*count, 4);
                assert_eq!(*mean, 2.5);
                assert_eq!(*std, 1.12);
                assert_eq!(min.as_i64(), Some(1));
                // Nearest-rank: floor(4 * .25) = 1 -> 2, floor(4 * .5) = 2
                // -> 3, floor(4 * .75) = 3 -> 4
                assert_eq!(p25.as_i64(), Some(2));
                assert_eq!(p50.as_i64(), Some(3));
                assert_eq!(p75.as_i64(), Some(4));
                assert_eq!(max.as_i64(), Some(4));
            }
            other => panic!("expected numeric stats, got {:?}", other),
        }
    }

    #[test]
    fn test_categorical_column() {
        let records = records_from(json!([{"c": "a"}, {"c": "a"}, {"c": "b"}]));
        let all = stats(&records);
        assert_eq!(
            all["c"],
            ColumnStats::Categorical {
                count: 3,
                unique: 2,
                top: Some("a".to_string()),
                freq: 2,
            }
        );
    }

    #[test]
    fn test_categorical_tie_breaks_by_first_seen() {
        let records = records_from(json!([{"c": "x"}, {"c": "y"}, {"c": "y"}, {"c": "x"}]));
        let all = stats(&records);
        match &all["c"] {
            ColumnStats::Categorical { top, freq, .. } => {
                assert_eq!(top.as_deref(), Some("x"));
                assert_eq!(*freq, 2);
            }
            other => panic!("expected categorical stats, got {:?}", other),
        }
    }

    #[test]
    fn test_booleans_are_categorical() {
        let records = records_from(json!([{"f": true}, {"f": true}, {"f": false}]));
        let all = stats(&records);
        match &all["f"] {
            ColumnStats::Categorical { count, top, .. } => {
                assert_eq!(*count, 3);
                assert_eq!(top.as_deref(), Some("true"));
            }
            other => panic!("expected categorical stats, got {:?}", other),
        }
    }

    #[test]
    fn test_nulls_and_missing_keys_are_skipped() {
        let records = records_from(json!([
            {"n": 1, "only_null": null},
            {"n": null},
            {"m": 5}
        ]));
        let all = stats(&records);
        match &all["n"] {
            ColumnStats::Numeric { count, .. } => assert_eq!(*count, 1),
            other => panic!("expected numeric stats, got {:?}", other),
        }
        assert_eq!(all["only_null"], ColumnStats::Empty { count: 0 });
    }

    #[test]
    fn test_single_value_column() {
        let records = records_from(json!([{"n": 7.5}]));
        let all = stats(&records);
        match &all["n"] {
            ColumnStats::Numeric {
                count,
                mean,
                std,
                min,
                max,
                ..
            } => {
                assert_eq!(*count, 1);
                assert_eq!(*mean, 7.5);
                assert_eq!(*std, 0.0);
                assert_eq!(min.as_f64(), Some(7.5));
                assert_eq!(max.as_f64(), Some(7.5));
            }
            other => panic!("expected numeric stats, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_numbers_and_strings_count_as_categorical() {
        let records = records_from(json!([{"v": 1}, {"v": "1"}, {"v": 2}]));
        let all = stats(&records);
        match &all["v"] {
            ColumnStats::Categorical { count, unique, top, freq } => {
                assert_eq!(*count, 3);
                // "1" and 1 stringify to the same key
                assert_eq!(*unique, 2);
                assert_eq!(top.as_deref(), Some("1"));
                assert_eq!(*freq, 2);
            }
            other => panic!("expected categorical stats, got {:?}", other),
        }
    }

    #[test]
    fn test_columns_sorted_deduplicated_union() {
        let records = records_from(json!([
            {"b": 1, "a": 2},
            {"c": 3, "a": 4}
        ]));
        assert_eq!(columns(&records), ["a", "b", "c"]);
    }

    #[test]
    fn test_columns_match_produced_stats_keys() {
        let records = records_from(json!([{"z": 1}, {"a": 2}]));
        let all = stats(&records);
        let keys: Vec<&String> = all.keys().collect();
        assert_eq!(keys, columns(&records).iter().collect::<Vec<_>>());
    }
}
