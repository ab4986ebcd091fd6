//! Lektor text -> flat record.
//!
//! Structural parsing is done by [`super::grammar`]; this module turns the
//! raw pieces into JSON values and applies the field fixups.

use serde_json::{Map, Value};

use super::grammar::{self, RawValue};
use super::others;
use crate::error::{CmsError, CmsResult};
use crate::fields::{FieldKind, INTEGER_FIELDS, OTHERS_FIELD};

/// Textual token standing for a null value.
pub const NULL_TOKEN: &str = "None";

/// Decode a `contents.lr` document into a flat record.
pub fn decode(text: &str) -> CmsResult<Map<String, Value>> {
    let text = text.replace("\r\n", "\n");
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let mut record = Map::new();

    for (key, raw) in grammar::parse_document(text)? {
        record.insert(key.to_string(), raw_to_value(raw));
    }

    apply_fixups(&mut record)?;
    Ok(record)
}

fn raw_to_value(raw: RawValue<'_>) -> Value {
    match raw {
        RawValue::Text(NULL_TOKEN) => Value::Null,
        RawValue::Text(text) => Value::String(text.to_string()),
        RawValue::Items(items) => Value::Array(
            items
                .into_iter()
                .map(|item| Value::String(item.to_string()))
                .collect(),
        ),
        RawValue::Records(records) => Value::Array(
            records
                .into_iter()
                .map(|pairs| {
                    let object: Map<String, Value> = pairs
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                        .collect();
                    Value::Object(object)
                })
                .collect(),
        ),
    }
}

/// Coerce a decoded value to integer-or-null.
///
/// `None`, the empty string and null become null; any other text must be
/// an integer. Numbers must be whole and fit an `i64`.
pub fn coerce_integer(field: &str, value: &Value) -> CmsResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Number(n) if n.is_i64() => Ok(value.clone()),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() || text == NULL_TOKEN {
                return Ok(Value::Null);
            }
            text.parse::<i64>()
                .map(Value::from)
                .map_err(|_| CmsError::InvalidInteger {
                    field: field.to_string(),
                    value: text.to_string(),
                })
        }
        other => Err(CmsError::InvalidInteger {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

fn apply_fixups(record: &mut Map<String, Value>) -> CmsResult<()> {
    for &name in INTEGER_FIELDS {
        if let Some(value) = record.get_mut(name) {
            *value = coerce_integer(name, value)?;
        }
    }

    if let Some(Value::Array(media)) = record.get_mut("videos") {
        for entry in media.iter_mut() {
            fix_media_record(entry)?;
        }
    }

    if let Some(Value::Array(urls)) = record.get_mut("related_urls") {
        for entry in urls.iter_mut() {
            collapse_related_url(entry);
        }
    }

    for (name, value) in record.iter_mut() {
        if FieldKind::of(name).is_list() && value.as_str() == Some("") {
            *value = Value::Array(Vec::new());
        }
    }

    if let Some(blob) = record.remove(OTHERS_FIELD) {
        let extra = match blob {
            Value::String(text) => others::load(&text)?,
            Value::Null => Map::new(),
            _ => {
                return Err(CmsError::UnexpectedShape {
                    field: OTHERS_FIELD.to_string(),
                    message: "expected a YAML text block".to_string(),
                })
            }
        };
        record.extend(extra);
    }

    Ok(())
}

fn fix_media_record(entry: &mut Value) -> CmsResult<()> {
    let Some(object) = entry.as_object_mut() else {
        return Ok(());
    };

    if object.get("length").and_then(Value::as_str) == Some(NULL_TOKEN) {
        object.remove("length");
    } else if let Some(length) = object.get_mut("length") {
        *length = coerce_integer("length", length)?;
    }
    Ok(())
}

fn collapse_related_url(entry: &mut Value) {
    let bare = match entry.as_object() {
        Some(object) if object.get("label").and_then(Value::as_str) == Some("") => {
            object.get("url").cloned()
        }
        _ => None,
    };
    if let Some(url) = bare {
        *entry = url;
    }
}
