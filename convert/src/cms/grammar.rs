//! Delimiter grammar of lektor `contents.lr` files.
//!
//! Three delimiter levels, outermost first:
//!
//! ```text
//! title: Keynote              ─┐
//! ---                          │ `---` separates top-level fields
//! speakers:                   ─┤
//!                              │
//! #### text ####               │ `#### <label> ####` starts a list item
//! text: Jane Doe               │
//! ---                         ─┤
//! videos:                      │
//!                              │
//! #### video ####              │
//! url: http://v                │
//! ----                         │ `----` separates the fields of one item
//! type: mp4                   ─┘
//! ```
//!
//! Banner and `----` splitting is only attempted for list fields whose value
//! starts with a `####` banner. Free text containing dash runs is therefore
//! left alone, except for a line that is exactly `---`, which always ends
//! the field. Likewise a banner or `----` line inside a list item ends the
//! item. The encoder refuses to write such text rather than produce a file
//! that reads back differently.
//!
//! Values are kept verbatim apart from their framing (see
//! [`split_key_value`]).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CmsError, CmsResult};
use crate::fields::FieldKind;

/// Separator between top-level fields.
pub const FIELD_SEPARATOR: &str = "---";

/// Separator between the fields of a list item.
pub const SUBFIELD_SEPARATOR: &str = "----";

/// Prefix marking the start of a list of items.
pub const BANNER_MARK: &str = "####";

static FIELD_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^---$").expect("valid field separator regex"));

static BANNER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#### .* ####$").expect("valid banner regex"));

static SUBFIELD_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^----$").expect("valid subfield separator regex"));

static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("valid key regex"));

/// Structure of one top-level field value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<'a> {
    /// Plain text, already trimmed.
    Text(&'a str),
    /// List items holding a single `label: value` pair; only values are kept.
    Items(Vec<&'a str>),
    /// List items holding several `key: value` pairs.
    Records(Vec<Vec<(&'a str, &'a str)>>),
}

/// Render a banner line for a list item.
pub fn banner(label: &str) -> String {
    format!("{BANNER_MARK} {label} {BANNER_MARK}")
}

/// Whether `key` can be written as a field name.
pub fn is_valid_key(key: &str) -> bool {
    KEY_RE.is_match(key)
}

/// Split `text` on a delimiter regex, removing the line breaks that frame
/// each delimiter line: the one after the previous delimiter and the one
/// before the next.
fn split_framed<'a>(delimiter: &Regex, text: &'a str) -> Vec<&'a str> {
    let pieces: Vec<&str> = delimiter.split(text).collect();
    let last = pieces.len().saturating_sub(1);
    pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| {
            let piece = if i > 0 {
                piece.strip_prefix('\n').unwrap_or(piece)
            } else {
                piece
            };
            if i < last {
                piece.strip_suffix('\n').unwrap_or(piece)
            } else {
                piece
            }
        })
        .collect()
}

/// Split a document on `---` lines. Blank chunks are dropped.
///
/// The document's final line break is not part of the last field.
pub fn split_fields(text: &str) -> Vec<&str> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    split_framed(&FIELD_SEPARATOR_RE, text)
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}

/// Split a chunk into key and value on the first colon.
///
/// Only the framing written around the value is removed: the single space
/// of `key: value`, or the blank line of `key:` followed by a text block.
/// Everything else, indentation and trailing line breaks included, belongs
/// to the value.
pub fn split_key_value(chunk: &str) -> CmsResult<(&str, &str)> {
    let (key, rest) = chunk
        .split_once(':')
        .ok_or_else(|| CmsError::MalformedField(preview(chunk)))?;

    let key = key.trim();
    if !is_valid_key(key) {
        return Err(CmsError::MalformedField(preview(chunk)));
    }

    let value = if let Some(block) = rest.strip_prefix("\n\n") {
        block
    } else if let Some(block) = rest.strip_prefix('\n') {
        block
    } else {
        // A one-line value never ends with a line break of its own.
        let line = rest.strip_prefix(' ').unwrap_or(rest);
        line.trim_end_matches('\n')
    };

    Ok((key, value))
}

/// Whether a value is a list of items.
pub fn is_block_list(value: &str) -> bool {
    value.trim_start().starts_with(BANNER_MARK)
}

/// Split a list value on banner lines.
///
/// Whatever precedes the first banner is discarded.
pub fn split_blocks(value: &str) -> Vec<&str> {
    split_framed(&BANNER_RE, value).into_iter().skip(1).collect()
}

/// Whether a value contains a `----` divider line.
pub fn has_subfields(value: &str) -> bool {
    SUBFIELD_SEPARATOR_RE.is_match(value)
}

/// Split a list item on `----` lines. Blank chunks are dropped.
pub fn split_subfields(block: &str) -> Vec<&str> {
    split_framed(&SUBFIELD_SEPARATOR_RE, block)
        .into_iter()
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}

/// Whether text holds a line that would end a top-level field.
pub fn has_field_separator(text: &str) -> bool {
    FIELD_SEPARATOR_RE.is_match(&text.replace("\r\n", "\n"))
}

/// Whether text holds a line that would end a list item or one of its
/// sub-fields.
pub fn has_item_delimiter(text: &str) -> bool {
    let text = text.replace("\r\n", "\n");
    FIELD_SEPARATOR_RE.is_match(&text)
        || SUBFIELD_SEPARATOR_RE.is_match(&text)
        || BANNER_RE.is_match(&text)
}

/// Parse the value of one top-level field of the given kind.
///
/// Only list kinds are split into items; any other value is text, even
/// when it starts with a banner.
pub fn parse_value(kind: FieldKind, value: &str) -> CmsResult<RawValue<'_>> {
    if !kind.is_list() || !is_block_list(value) {
        return Ok(RawValue::Text(value));
    }

    let blocks = split_blocks(value);

    if has_subfields(value) {
        let records = blocks
            .into_iter()
            .map(|block| {
                split_subfields(block)
                    .into_iter()
                    .map(split_key_value)
                    .collect::<CmsResult<Vec<_>>>()
            })
            .collect::<CmsResult<Vec<_>>>()?;
        return Ok(RawValue::Records(records));
    }

    let items = blocks
        .into_iter()
        .filter(|block| !block.trim().is_empty())
        .map(|block| split_key_value(block).map(|(_, value)| value))
        .collect::<CmsResult<Vec<_>>>()?;
    Ok(RawValue::Items(items))
}

/// Parse a whole document into its fields, in file order.
///
/// Fields whose name starts with `_` (lektor system fields) are skipped.
pub fn parse_document(text: &str) -> CmsResult<Vec<(&str, RawValue<'_>)>> {
    if text.trim().is_empty() {
        return Err(CmsError::EmptyDocument);
    }

    let mut fields = Vec::new();
    for chunk in split_fields(text) {
        let (key, value) = split_key_value(chunk)?;
        if key.starts_with('_') {
            continue;
        }
        fields.push((key, parse_value(FieldKind::of(key), value)?));
    }
    Ok(fields)
}

/// First line of a chunk, for error messages.
fn preview(chunk: &str) -> String {
    let line = chunk.trim().lines().next().unwrap_or("");
    if line.chars().count() > 60 {
        format!("{}...", line.chars().take(60).collect::<String>())
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_three_dashes() {
        let text = "title: A\n---\ndescription: B\n";
        let chunks = split_fields(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(split_key_value(chunks[0]).unwrap(), ("title", "A"));
        assert_eq!(split_key_value(chunks[1]).unwrap(), ("description", "B"));
    }

    #[test]
    fn test_split_fields_ignores_longer_dash_runs() {
        let text = "description:\n\nHeading\n----\n\nbody\n---\ntitle: A";
        let chunks = split_fields(text);
        assert_eq!(chunks.len(), 2);
        let (_, value) = split_key_value(chunks[0]).unwrap();
        assert_eq!(value, "Heading\n----\n\nbody");
    }

    #[test]
    fn test_split_fields_requires_line_of_its_own() {
        let text = "title: a --- b";
        assert_eq!(split_fields(text).len(), 1);
    }

    #[test]
    fn test_split_key_value_first_colon() {
        let (key, value) = split_key_value("thumbnail_url: http://x/y.png").unwrap();
        assert_eq!(key, "thumbnail_url");
        assert_eq!(value, "http://x/y.png");
    }

    #[test]
    fn test_split_key_value_multiline() {
        let (key, value) = split_key_value("description:\n\nline 1\nline 2").unwrap();
        assert_eq!(key, "description");
        assert_eq!(value, "line 1\nline 2");
    }

    #[test]
    fn test_split_key_value_keeps_indentation_and_newlines() {
        let (_, value) = split_key_value("description:\n\n    indented code\nmore\n").unwrap();
        assert_eq!(value, "    indented code\nmore\n");

        let (_, value) = split_key_value("title:   padded ").unwrap();
        assert_eq!(value, "  padded ");

        let (_, value) = split_key_value("title:").unwrap();
        assert_eq!(value, "");
    }

    #[test]
    fn test_split_fields_removes_framing_only() {
        let text = "title: A\n---\ndescription:\n\nbody\n\n---\ntags:\n";
        let chunks = split_fields(text);
        assert_eq!(chunks, vec!["title: A", "description:\n\nbody\n", "tags:"]);
    }

    #[test]
    fn test_split_key_value_rejects_missing_colon() {
        let err = split_key_value("just some text").unwrap_err();
        assert!(matches!(err, CmsError::MalformedField(_)));
    }

    #[test]
    fn test_split_key_value_rejects_bad_key() {
        assert!(split_key_value("not a key: value").is_err());
        assert!(split_key_value(": value").is_err());
    }

    #[test]
    fn test_split_blocks_discards_leading_piece() {
        let value = "#### text ####\ntext: Jane\n#### text ####\ntext: John";
        let blocks = split_blocks(value);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].trim(), "text: Jane");
        assert_eq!(blocks[1].trim(), "text: John");
    }

    #[test]
    fn test_banner_requires_closing_hashes() {
        let value = "#### text ####\ntext: #### not a banner\n";
        assert_eq!(split_blocks(value).len(), 1);
    }

    #[test]
    fn test_subfields_four_dashes() {
        let block = "\nurl: http://v\n----\ntype: mp4\n----\nlength: 10\n";
        assert!(has_subfields(block));
        let parts: Vec<_> = split_subfields(block)
            .into_iter()
            .map(|p| split_key_value(p).unwrap())
            .collect();
        assert_eq!(
            parts,
            vec![("url", "http://v"), ("type", "mp4"), ("length", "10")]
        );
    }

    #[test]
    fn test_parse_value_text() {
        assert_eq!(
            parse_value(FieldKind::Scalar, "hello").unwrap(),
            RawValue::Text("hello")
        );
        assert_eq!(
            parse_value(FieldKind::ListOfScalars, "").unwrap(),
            RawValue::Text("")
        );
    }

    #[test]
    fn test_banner_in_scalar_is_text() {
        let value = "#### Hello ####";
        assert_eq!(
            parse_value(FieldKind::Scalar, value).unwrap(),
            RawValue::Text(value)
        );
        assert_eq!(
            parse_value(FieldKind::Other, value).unwrap(),
            RawValue::Text(value)
        );
    }

    #[test]
    fn test_parse_value_items() {
        let value = "#### text ####\ntext: Jane Doe\n#### text ####\ntext: John: Jr";
        assert_eq!(
            parse_value(FieldKind::ListOfScalars, value).unwrap(),
            RawValue::Items(vec!["Jane Doe", "John: Jr"])
        );
    }

    #[test]
    fn test_parse_value_records() {
        let value = "#### url ####\nurl: http://a\n----\nlabel: A\n#### url ####\nurl: http://b\n----\nlabel:";
        assert_eq!(
            parse_value(FieldKind::ListOfUrls, value).unwrap(),
            RawValue::Records(vec![
                vec![("url", "http://a"), ("label", "A")],
                vec![("url", "http://b"), ("label", "")],
            ])
        );
    }

    #[test]
    fn test_dashes_in_free_text_are_not_subfields() {
        // No banner, so the `----` line stays part of the text.
        let value = "Intro\n----\nMore";
        assert_eq!(
            parse_value(FieldKind::ListOfScalars, value).unwrap(),
            RawValue::Text(value)
        );
    }

    #[test]
    fn test_parse_document_drops_system_fields() {
        let text = "_model: video\n---\ntitle: Keynote\n";
        let fields = parse_document(text).unwrap();
        assert_eq!(fields, vec![("title", RawValue::Text("Keynote"))]);
    }

    #[test]
    fn test_delimiter_detection() {
        assert!(has_field_separator("FAQ\n---\nq: a"));
        assert!(has_field_separator("FAQ\r\n---\r\nq: a"));
        assert!(!has_field_separator("Heading\n-------\nbody"));
        assert!(!has_field_separator("a --- b"));

        assert!(has_item_delimiter("a\n----\nb"));
        assert!(has_item_delimiter("a\n#### text ####\nb"));
        assert!(!has_item_delimiter("#### not closed"));
    }

    #[test]
    fn test_parse_document_empty() {
        assert!(matches!(
            parse_document("  \n"),
            Err(CmsError::EmptyDocument)
        ));
    }

    #[test]
    fn test_parse_document_malformed_chunk() {
        let text = "title: A\n---\nthis line has no separator\n";
        assert!(matches!(
            parse_document(text),
            Err(CmsError::MalformedField(_))
        ));
    }
}
