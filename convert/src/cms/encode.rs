//! Flat record -> lektor text.
//!
//! Regions are written in a fixed order: scalars, text lists, URL lists,
//! media lists, then the `others` YAML block. Only fields present in the
//! record are written and every field is a self-contained block between
//! `---` lines, so a missing region never touches its neighbours.

use serde_json::{Map, Value};

use super::decode::{coerce_integer, NULL_TOKEN};
use super::grammar::{self, FIELD_SEPARATOR, SUBFIELD_SEPARATOR};
use super::others;
use super::Model;
use crate::error::{CmsError, CmsResult};
use crate::fields::{
    FieldKind, INTEGER_FIELDS, MEDIA_LIST_FIELDS, OTHERS_FIELD, TEXT_LIST_FIELDS,
    URL_LIST_FIELDS,
};

/// Encode a flat record as a `contents.lr` document.
pub fn encode(model: Model, record: &Map<String, Value>) -> CmsResult<String> {
    let mut blocks = vec![render_field("_model", model.name())];

    for &name in model.scalar_fields() {
        if let Some(value) = record.get(name) {
            if model == Model::Video && INTEGER_FIELDS.contains(&name) {
                coerce_integer(name, value)?;
            }
            blocks.push(render_field(name, &field_text(name, value)?));
        }
    }

    if model == Model::Video {
        for &name in TEXT_LIST_FIELDS {
            if let Some(value) = record.get(name) {
                blocks.push(render_list(name, value, text_item)?);
            }
        }
        for &name in URL_LIST_FIELDS {
            if let Some(value) = record.get(name) {
                blocks.push(render_list(name, value, url_item)?);
            }
        }
        for &name in MEDIA_LIST_FIELDS {
            if let Some(value) = record.get(name) {
                blocks.push(render_list(name, value, media_item)?);
            }
        }
    }

    let rest: Map<String, Value> = record
        .iter()
        .filter(|(name, _)| model.classify(name) == FieldKind::Other)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    if !rest.is_empty() {
        let yaml = others::dump(&rest)?;
        guard_field_text(OTHERS_FIELD, &yaml)?;
        // Always a text block, even for a one-line mapping.
        blocks.push(format!("{OTHERS_FIELD}:\n\n{yaml}"));
    }

    let mut text = blocks.join(&format!("\n{FIELD_SEPARATOR}\n"));
    text.push('\n');
    Ok(text)
}

/// Render one `key: value` block. Multi-line text goes below a blank line.
fn render_field(key: &str, text: &str) -> String {
    if text.is_empty() {
        format!("{key}:")
    } else if text.contains('\n') {
        format!("{key}:\n\n{text}")
    } else {
        format!("{key}: {text}")
    }
}

/// Textual form of a scalar value.
fn scalar_text(field: &str, value: &Value) -> CmsResult<String> {
    match value {
        Value::Null => Ok(NULL_TOKEN.to_string()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) | Value::Object(_) => Err(CmsError::UnexpectedShape {
            field: field.to_string(),
            message: format!("expected a scalar, found {}", others::json_type(value)),
        }),
    }
}

/// Text of a top-level scalar field.
fn field_text(field: &str, value: &Value) -> CmsResult<String> {
    let text = scalar_text(field, value)?;
    guard_field_text(field, &text)?;
    Ok(text)
}

/// Text of a list item sub-field.
fn item_text(field: &str, value: &Value) -> CmsResult<String> {
    let text = scalar_text(field, value)?;
    if grammar::has_item_delimiter(&text) {
        return Err(CmsError::UnexpectedShape {
            field: field.to_string(),
            message: "item text holds a `---`, `----` or banner line".to_string(),
        });
    }
    Ok(text)
}

fn guard_field_text(field: &str, text: &str) -> CmsResult<()> {
    if grammar::has_field_separator(text) {
        return Err(CmsError::UnexpectedShape {
            field: field.to_string(),
            message: "text holds a `---` line".to_string(),
        });
    }
    Ok(())
}

/// A list item: banner label plus its sub-fields.
struct Item {
    label: &'static str,
    fields: Vec<(String, String)>,
}

fn render_list(
    field: &str,
    value: &Value,
    to_item: fn(&str, &Value) -> CmsResult<Item>,
) -> CmsResult<String> {
    let entries = match value {
        Value::Null => return Ok(render_field(field, NULL_TOKEN)),
        Value::Array(entries) => entries,
        other => {
            return Err(CmsError::UnexpectedShape {
                field: field.to_string(),
                message: format!("expected a list, found {}", others::json_type(other)),
            })
        }
    };

    let items = entries
        .iter()
        .map(|entry| to_item(field, entry).map(|item| render_item(&item)))
        .collect::<CmsResult<Vec<_>>>()?;

    Ok(render_field(field, &items.join("\n")))
}

fn render_item(item: &Item) -> String {
    let fields: Vec<String> = item
        .fields
        .iter()
        .map(|(key, text)| render_field(key, text))
        .collect();
    format!(
        "{}\n{}",
        grammar::banner(item.label),
        fields.join(&format!("\n{SUBFIELD_SEPARATOR}\n"))
    )
}

fn text_item(field: &str, entry: &Value) -> CmsResult<Item> {
    Ok(Item {
        label: "text",
        fields: vec![("text".to_string(), item_text(field, entry)?)],
    })
}

fn url_item(field: &str, entry: &Value) -> CmsResult<Item> {
    let fields = match entry {
        Value::String(_) => vec![
            ("url".to_string(), item_text(field, entry)?),
            ("label".to_string(), String::new()),
        ],
        Value::Object(object) => record_fields(field, object, &[("url", ""), ("label", "")])?,
        other => return Err(bad_entry(field, other)),
    };
    Ok(Item { label: "url", fields })
}

fn media_item(field: &str, entry: &Value) -> CmsResult<Item> {
    let fields = match entry {
        Value::String(_) => vec![
            ("url".to_string(), item_text(field, entry)?),
            ("type".to_string(), String::new()),
            ("length".to_string(), NULL_TOKEN.to_string()),
        ],
        Value::Object(object) => {
            if let Some(length) = object.get("length") {
                coerce_integer("length", length)?;
            }
            record_fields(
                field,
                object,
                &[("url", ""), ("type", ""), ("length", NULL_TOKEN)],
            )?
        }
        other => return Err(bad_entry(field, other)),
    };
    Ok(Item { label: "video", fields })
}

/// Sub-fields of a record: `known` keys first (with their default text
/// when missing), then every other key alphabetically.
fn record_fields(
    field: &str,
    object: &Map<String, Value>,
    known: &[(&str, &str)],
) -> CmsResult<Vec<(String, String)>> {
    let mut fields = Vec::with_capacity(object.len().max(known.len()));

    for &(key, default) in known {
        let text = match object.get(key) {
            Some(value) => item_text(field, value)?,
            None => default.to_string(),
        };
        fields.push((key.to_string(), text));
    }

    for (key, value) in object {
        if known.iter().any(|(k, _)| *k == key.as_str()) {
            continue;
        }
        if !grammar::is_valid_key(key) {
            return Err(CmsError::UnexpectedShape {
                field: field.to_string(),
                message: format!("'{key}' cannot be written as a field name"),
            });
        }
        fields.push((key.clone(), item_text(field, value)?));
    }

    Ok(fields)
}

fn bad_entry(field: &str, entry: &Value) -> CmsError {
    CmsError::UnexpectedShape {
        field: field.to_string(),
        message: format!(
            "expected a URL or a record, found {}",
            others::json_type(entry)
        ),
    }
}
