use serde::Serialize;
use serde_json::Value;

/// The five-way classification of a document's top-level shape.
///
/// Computed once from the root value right after parse and immutable
/// afterwards; drives which normalization strategy runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectedFormat {
    /// COCO-style annotation bundle: top-level `images`/`annotations`/
    /// `categories` arrays joined by numeric ids.
    Coco,
    /// An object with at least one object-valued key.
    NestedDict,
    /// An object with at least one array-valued key (and no object values).
    NestedList,
    /// A top-level array.
    Array,
    /// Anything else (scalar root, empty object, ...).
    Unknown,
}

impl std::fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DetectedFormat::Coco => "coco",
            DetectedFormat::NestedDict => "nested_dict",
            DetectedFormat::NestedList => "nested_list",
            DetectedFormat::Array => "array",
            DetectedFormat::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Short name of a value's JSON type, for diagnostics and reports.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Classify the top-level shape of a parsed document.
///
/// Pure function of the root's shape (keys and value types, not content).
/// Rules are checked in order and the first match wins:
///
/// 1. object with both `images` and `annotations` keys, or with an
///    array-valued `images` key -> `Coco`
/// 2. object with any object-valued key -> `NestedDict`
/// 3. object with any array-valued key -> `NestedList`
/// 4. array -> `Array`
/// 5. everything else -> `Unknown`
pub fn detect(root: &Value) -> DetectedFormat {
    match root {
        Value::Object(map) => {
            let images_is_array = matches!(map.get("images"), Some(Value::Array(_)));
            if (map.contains_key("images") && map.contains_key("annotations")) || images_is_array {
                return DetectedFormat::Coco;
            }
            if map.values().any(Value::is_object) {
                return DetectedFormat::NestedDict;
            }
            if map.values().any(Value::is_array) {
                return DetectedFormat::NestedList;
            }
            DetectedFormat::Unknown
        }
        Value::Array(_) => DetectedFormat::Array,
        _ => DetectedFormat::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coco_with_images_and_annotations() {
        let doc = json!({"images": [], "annotations": []});
        assert_eq!(detect(&doc), DetectedFormat::Coco);
    }

    #[test]
    fn test_coco_with_images_array_only() {
        let doc = json!({"images": [{"id": 1}], "extra": "metadata"});
        assert_eq!(detect(&doc), DetectedFormat::Coco);
    }

    #[test]
    fn test_images_key_that_is_not_an_array() {
        // `images` present but scalar, and no `annotations`: not COCO
        let doc = json!({"images": "none", "config": {"a": 1}});
        assert_eq!(detect(&doc), DetectedFormat::NestedDict);
    }

    #[test]
    fn test_coco_wins_over_nested_dict() {
        // Precedence: the COCO rule is checked before the nested-dict rule
        let doc = json!({
            "images": [{"id": 1}],
            "annotations": [],
            "settings": {"threshold": 0.5}
        });
        assert_eq!(detect(&doc), DetectedFormat::Coco);
    }

    #[test]
    fn test_nested_dict() {
        let doc = json!({"user": {"name": "alice"}, "active": true});
        assert_eq!(detect(&doc), DetectedFormat::NestedDict);
    }

    #[test]
    fn test_nested_dict_wins_over_nested_list() {
        let doc = json!({"user": {"name": "alice"}, "tags": ["a", "b"]});
        assert_eq!(detect(&doc), DetectedFormat::NestedDict);
    }

    #[test]
    fn test_nested_list() {
        let doc = json!({"users": [{"id": 1}], "count": 1});
        assert_eq!(detect(&doc), DetectedFormat::NestedList);
    }

    #[test]
    fn test_array_root() {
        let doc = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(detect(&doc), DetectedFormat::Array);
    }

    #[test]
    fn test_flat_object_is_unknown() {
        let doc = json!({"a": 1, "b": "two"});
        assert_eq!(detect(&doc), DetectedFormat::Unknown);
    }

    #[test]
    fn test_scalar_roots_are_unknown() {
        assert_eq!(detect(&json!(42)), DetectedFormat::Unknown);
        assert_eq!(detect(&json!("hello")), DetectedFormat::Unknown);
        assert_eq!(detect(&json!(null)), DetectedFormat::Unknown);
        assert_eq!(detect(&json!({})), DetectedFormat::Unknown);
    }
}
