//! Format-specific flattening strategies.
//!
//! Each detected format has one strategy that turns the root value into an
//! ordered list of flat records. Every strategy is total: any well-formed
//! value produces a record set, degenerate shapes fall back to the
//! single-record `Unknown` wrapping.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::normalize::detect::{json_type_name, DetectedFormat};
use crate::{Record, RecordSet};

/// Flatten a parsed document into records using the detected format's
/// strategy. Takes ownership of the root; the returned records share no
/// structure with the caller's value.
pub fn normalize(root: Value, format: DetectedFormat) -> RecordSet {
    match format {
        DetectedFormat::Coco => match root {
            Value::Object(map) => normalize_coco(&map),
            other => normalize_unknown(other),
        },
        DetectedFormat::NestedDict => match root {
            Value::Object(map) => normalize_nested_dict(&map),
            other => normalize_unknown(other),
        },
        DetectedFormat::NestedList => match root {
            Value::Object(map) => normalize_nested_list(map),
            other => normalize_unknown(other),
        },
        DetectedFormat::Array => match root {
            Value::Array(items) => normalize_array(items),
            other => normalize_unknown(other),
        },
        DetectedFormat::Unknown => normalize_unknown(root),
    }
}

/// Canonical lookup key for a COCO id value. Integer-valued floats collapse
/// to their integer form so `1` and `1.0` join the same way.
fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                if f.fract() == 0.0 {
                    Some((f as i64).to_string())
                } else {
                    Some(f.to_string())
                }
            }
        }
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn section_array<'a>(root: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    match root.get(key) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Join a COCO-style bundle into one record per annotation.
///
/// Builds id lookups from `images` and `categories`, then walks
/// `annotations` in array order. Record count equals annotation count.
fn normalize_coco(root: &Map<String, Value>) -> RecordSet {
    let images = section_array(root, "images");
    let annotations = section_array(root, "annotations");
    let categories = section_array(root, "categories");

    let image_index: HashMap<String, &Map<String, Value>> = images
        .iter()
        .filter_map(|img| {
            let obj = img.as_object()?;
            Some((id_key(obj.get("id")?)?, obj))
        })
        .collect();

    let category_names: HashMap<String, &Value> = categories
        .iter()
        .filter_map(|cat| {
            let obj = cat.as_object()?;
            Some((id_key(obj.get("id")?)?, obj.get("name")?))
        })
        .collect();

    let mut records = RecordSet::with_capacity(annotations.len());
    for ann in annotations {
        let fields = ann.as_object();
        let field = |name: &str| -> Value {
            fields
                .and_then(|obj| obj.get(name))
                .cloned()
                .unwrap_or(Value::Null)
        };

        let mut record = Record::new();
        record.insert("annotation_id".to_string(), field("id"));
        record.insert("image_id".to_string(), field("image_id"));
        record.insert("category_id".to_string(), field("category_id"));

        let category_name = fields
            .and_then(|obj| obj.get("category_id"))
            .and_then(id_key)
            .and_then(|key| category_names.get(&key))
            .map(|name| (*name).clone())
            .unwrap_or_else(|| Value::String("unknown".to_string()));
        record.insert("category_name".to_string(), category_name);

        let image = fields
            .and_then(|obj| obj.get("image_id"))
            .and_then(id_key)
            .and_then(|key| image_index.get(&key));
        if let Some(img) = image {
            let img_field = |name: &str| img.get(name).cloned().unwrap_or(Value::Null);
            record.insert("image_name".to_string(), img_field("file_name"));
            record.insert("image_width".to_string(), img_field("width"));
            record.insert("image_height".to_string(), img_field("height"));
        }

        if let Some(Value::Array(bbox)) = fields.and_then(|obj| obj.get("bbox")) {
            // Positional decomposition; short arrays fill with nulls
            let names = ["bbox_x", "bbox_y", "bbox_width", "bbox_height"];
            for (idx, name) in names.iter().enumerate() {
                record.insert(
                    (*name).to_string(),
                    bbox.get(idx).cloned().unwrap_or(Value::Null),
                );
            }
        }

        if let Some(area) = fields.and_then(|obj| obj.get("area")) {
            record.insert("area".to_string(), area.clone());
        }
        if let Some(iscrowd) = fields.and_then(|obj| obj.get("iscrowd")) {
            record.insert("iscrowd".to_string(), iscrowd.clone());
        }

        records.push(record);
    }

    records
}

/// Flatten a nested object into a single record with `_`-joined key paths.
/// Arrays and scalars are assigned as-is; only objects recurse.
fn normalize_nested_dict(root: &Map<String, Value>) -> RecordSet {
    let mut record = Record::new();
    flatten_into(root, "", &mut record);
    vec![record]
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut Record) {
    for (key, value) in map {
        let flat_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}_{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten_into(inner, &flat_key, out),
            other => {
                out.insert(flat_key, other.clone());
            }
        }
    }
}

/// Expand every array-valued top-level key into rows, tagging each row with
/// a `source` column naming the key it came from. Object elements merge
/// their fields into the row (last write wins); scalar elements land under
/// `value`. Falls back to the whole root as one record when no key holds an
/// array.
fn normalize_nested_list(root: Map<String, Value>) -> RecordSet {
    let mut records = RecordSet::new();
    for (key, value) in &root {
        let Value::Array(items) = value else { continue };
        for item in items {
            let mut record = Record::new();
            record.insert("source".to_string(), Value::String(key.clone()));
            match item {
                Value::Object(fields) => {
                    for (k, v) in fields {
                        record.insert(k.clone(), v.clone());
                    }
                }
                other => {
                    record.insert("value".to_string(), other.clone());
                }
            }
            records.push(record);
        }
    }

    if records.is_empty() {
        vec![root]
    } else {
        records
    }
}

/// A root array of objects is already tabular and is taken over as-is.
/// Anything else becomes one `{value, index}` record per element.
fn normalize_array(items: Vec<Value>) -> RecordSet {
    if !items.iter().all(Value::is_object) {
        return items
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                let mut record = Record::new();
                record.insert("value".to_string(), element);
                record.insert("index".to_string(), Value::from(index));
                record
            })
            .collect();
    }

    items
        .into_iter()
        .filter_map(|element| match element {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect()
}

/// Catch-all: nest the whole tree under a single `data` key.
fn normalize_unknown(root: Value) -> RecordSet {
    let mut record = Record::new();
    record.insert("data".to_string(), root);
    vec![record]
}

/// A serializable report of what the detector and normalizer saw: the
/// detected format, per-section sizes of the raw document, and the shape of
/// the normalized output.
#[derive(Debug, Clone, Serialize)]
pub struct StructureInfo {
    pub detected_format: DetectedFormat,
    pub root_type: &'static str,
    pub sections: Vec<Section>,
    pub record_count: usize,
    pub column_count: usize,
    pub sample_record: Option<Record>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub name: String,
    pub summary: String,
}

impl StructureInfo {
    /// Describe the raw document. Record-side fields start empty; chain
    /// [`StructureInfo::with_records`] once normalization has run.
    pub fn new(root: &Value, format: DetectedFormat) -> Self {
        let sections = match (format, root) {
            (DetectedFormat::Coco, Value::Object(map)) => ["images", "annotations", "categories"]
                .iter()
                .map(|name| Section {
                    name: (*name).to_string(),
                    summary: format!("{} entries", section_array(map, name).len()),
                })
                .collect(),
            (_, Value::Object(map)) => map
                .iter()
                .map(|(name, value)| Section {
                    name: name.clone(),
                    summary: match value {
                        Value::Array(items) => format!("{} entries", items.len()),
                        other => json_type_name(other).to_string(),
                    },
                })
                .collect(),
            _ => Vec::new(),
        };

        StructureInfo {
            detected_format: format,
            root_type: json_type_name(root),
            sections,
            record_count: 0,
            column_count: 0,
            sample_record: None,
        }
    }

    /// Fill in the normalized side of the report.
    pub fn with_records(mut self, records: &RecordSet) -> Self {
        self.record_count = records.len();
        self.column_count = crate::stats::columns(records).len();
        self.sample_record = records.first().cloned();
        self
    }

    /// Human-readable report, suitable for terminal output.
    pub fn render(&self) -> String {
        let mut out = Vec::new();
        out.push("=".repeat(60));
        out.push(format!(
            "Format detected: {}",
            self.detected_format.to_string().to_uppercase()
        ));
        out.push("=".repeat(60));

        if !self.sections.is_empty() {
            out.push(String::new());
            out.push("Data sections:".to_string());
            for section in &self.sections {
                out.push(format!("  - {}: {}", section.name, section.summary));
            }
        }

        out.push(String::new());
        out.push(format!("Normalized records: {}", self.record_count));
        out.push(format!("Columns: {}", self.column_count));

        if let Some(sample) = &self.sample_record {
            out.push(String::new());
            out.push("Sample record:".to_string());
            for (key, value) in sample.iter().take(5) {
                out.push(format!("  {}: {}", key, value));
            }
        }

        out.push("=".repeat(60));
        out.join("\n")
    }
}
