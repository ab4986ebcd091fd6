//! Field classification.
//!
//! Decides how each metadata field is represented in a lektor document.
//! The name sets are fixed; anything not listed here ends up in the
//! `others` YAML block.

/// Scalar video fields, in the order they are written.
pub const SCALAR_FIELDS: &[&str] = &[
    "title",
    "description",
    "recorded",
    "duration",
    "language",
    "thumbnail_url",
    "copyright_text",
];

/// Scalar video fields holding integer seconds (or null).
pub const INTEGER_FIELDS: &[&str] = &["duration"];

/// Video fields holding a list of plain strings.
pub const TEXT_LIST_FIELDS: &[&str] = &["speakers", "tags"];

/// Video fields holding a list of links.
pub const URL_LIST_FIELDS: &[&str] = &["related_urls"];

/// Video fields holding a list of media records.
pub const MEDIA_LIST_FIELDS: &[&str] = &["videos"];

/// Scalar event fields, in the order they are written.
pub const EVENT_SCALAR_FIELDS: &[&str] = &["title", "description"];

/// Name of the catch-all field in lektor documents.
pub const OTHERS_FIELD: &str = "others";

/// Representation category of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text (or number) written as `key: value`.
    Scalar,
    /// List of strings written as `#### text ####` blocks.
    ListOfScalars,
    /// List of `{url, label}` records (or bare URLs).
    ListOfUrls,
    /// List of `{url, type, length}` records.
    ListOfMedia,
    /// Anything else, folded into the `others` block.
    Other,
}

impl FieldKind {
    /// Classify a video field.
    pub fn of(name: &str) -> Self {
        if SCALAR_FIELDS.contains(&name) {
            Self::Scalar
        } else if TEXT_LIST_FIELDS.contains(&name) {
            Self::ListOfScalars
        } else if URL_LIST_FIELDS.contains(&name) {
            Self::ListOfUrls
        } else if MEDIA_LIST_FIELDS.contains(&name) {
            Self::ListOfMedia
        } else {
            Self::Other
        }
    }

    /// Classify an event field. Only the title and description stay scalar.
    pub fn of_event(name: &str) -> Self {
        if EVENT_SCALAR_FIELDS.contains(&name) {
            Self::Scalar
        } else {
            Self::Other
        }
    }

    /// Whether the field is one of the list categories.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::ListOfScalars | Self::ListOfUrls | Self::ListOfMedia
        )
    }
}
