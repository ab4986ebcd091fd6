//! Pyvideo JSON codec.
//!
//! Output is canonical so files diff cleanly against the data repository:
//! keys sorted at every level, two-space indentation, `": "` separators and
//! a trailing newline.

use serde_json::{Map, Value};

use crate::error::{TreeError, TreeResult};

/// Encode a flat record as canonical JSON.
pub fn encode(record: &Map<String, Value>) -> TreeResult<String> {
    // serde_json maps are ordered by key, so pretty printing already sorts.
    let mut text = serde_json::to_string_pretty(record)?;
    text.push('\n');
    Ok(text)
}

/// Decode a JSON document into a flat record.
pub fn decode(text: &str) -> TreeResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        Value::Null => Err(TreeError::NotAnObject("null")),
        Value::Bool(_) => Err(TreeError::NotAnObject("a boolean")),
        Value::Number(_) => Err(TreeError::NotAnObject("a number")),
        Value::String(_) => Err(TreeError::NotAnObject("a string")),
        Value::Array(_) => Err(TreeError::NotAnObject("an array")),
    }
}
