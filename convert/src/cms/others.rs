//! The `others` block: unclassified fields dumped as block-style YAML.
//!
//! Multi-line strings come out in literal (`|`) style, so descriptions and
//! notes stay readable in the lektor admin.

use serde_json::{Map, Value};

use crate::error::{CmsError, CmsResult};

/// Dump unclassified fields as YAML.
pub fn dump(fields: &Map<String, Value>) -> CmsResult<String> {
    let yaml = serde_yaml::to_string(fields)?;
    // `load` puts the final line break back.
    Ok(yaml.strip_suffix('\n').unwrap_or(&yaml).to_string())
}

/// Parse an `others` block back into fields.
pub fn load(text: &str) -> CmsResult<Map<String, Value>> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }

    // The field value lost its final line break to the document framing.
    let text = format!("{text}\n");
    match serde_yaml::from_str::<Value>(&text)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(CmsError::UnexpectedShape {
            field: crate::fields::OTHERS_FIELD.to_string(),
            message: format!("expected a mapping, found {}", json_type(&other)),
        }),
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_dump_is_block_style() {
        let fields = as_map(json!({
            "slug": "keynote",
            "alias": ["a", "b"],
        }));
        let yaml = dump(&fields).unwrap();
        assert!(yaml.contains("slug: keynote"));
        assert!(yaml.contains("- a"));
        assert!(!yaml.contains('{'));
    }

    #[test]
    fn test_multiline_string_is_literal() {
        let fields = as_map(json!({ "summary": "line one\nline two" }));
        let yaml = dump(&fields).unwrap();
        assert!(yaml.contains('|'));
        assert!(yaml.contains("  line one\n  line two"));
    }

    #[test]
    fn test_dump_then_load() {
        let fields = as_map(json!({
            "slug": "keynote",
            "quality_notes": "ends with newline\n",
            "id": 42,
            "source": null,
            "nested": { "a": [1, 2] },
        }));
        let yaml = dump(&fields).unwrap();
        assert_eq!(load(&yaml).unwrap(), fields);
    }

    #[test]
    fn test_load_rejects_non_mapping() {
        let err = load("- a\n- b").unwrap_err();
        assert!(matches!(err, CmsError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_load_empty() {
        assert!(load("").unwrap().is_empty());
    }
}
