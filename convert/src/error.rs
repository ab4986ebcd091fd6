//! Error types for the conversion pipeline.
//!
//! Errors are layered the same way the data flows:
//!
//! - [`CmsError`] - lektor `contents.lr` encoding/decoding errors
//! - [`TreeError`] - pyvideo JSON decoding errors
//! - [`StoreError`] - filesystem and glob errors
//! - [`ConvertError`] - top-level errors, annotated with the offending path
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CMS Text Errors
// =============================================================================

/// Errors while reading or writing the lektor text format.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Document has no fields at all.
    #[error("Document is empty")]
    EmptyDocument,

    /// A field block does not have the `key: value` shape.
    #[error("Malformed field block: {0}")]
    MalformedField(String),

    /// A numeric field holds text that is neither an integer nor a null token.
    #[error("Invalid integer for field '{field}': '{value}'")]
    InvalidInteger { field: String, value: String },

    /// A field value cannot be represented in its category.
    #[error("Unexpected value for field '{field}': {message}")]
    UnexpectedShape { field: String, message: String },

    /// The `others` block is not valid YAML.
    #[error("Invalid others block: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// =============================================================================
// JSON Tree Errors
// =============================================================================

/// Errors while reading the pyvideo JSON format.
#[derive(Debug, Error)]
pub enum TreeError {
    /// JSON syntax error.
    #[error("JSON syntax error: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON whose top level is not an object.
    #[error("Expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

// =============================================================================
// File Store Errors
// =============================================================================

/// Filesystem errors, always carrying the path involved.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Read/write failure.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid glob pattern.
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Unreadable entry while walking a glob.
    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// JSON file that failed to decode.
    #[error("Malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: TreeError,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// =============================================================================
// Conversion Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the error type returned by [`crate::convert::convert`].
/// Every decode failure names the file it came from.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Filesystem error (including malformed JSON files).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A `contents.lr` file that failed to decode.
    #[error("Malformed lektor file {}: {source}", .path.display())]
    MalformedCms {
        path: PathBuf,
        #[source]
        source: CmsError,
    },

    /// An entity that could not be rendered to the lektor format.
    #[error("Cannot encode {entity} as lektor text: {source}")]
    EncodeCms {
        entity: String,
        #[source]
        source: CmsError,
    },

    /// An entity that could not be rendered as JSON.
    #[error("Cannot encode {entity} as JSON: {source}")]
    EncodeJson {
        entity: String,
        #[source]
        source: TreeError,
    },

    /// A repository path that has no usable final component.
    #[error("Cannot derive an entity name from {}", .0.display())]
    UnnamedEntity(PathBuf),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for lektor text operations.
pub type CmsResult<T> = Result<T, CmsError>;

/// Result type for JSON tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Result type for file store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
