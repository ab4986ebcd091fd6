//! Lektor `contents.lr` codec.
//!
//! - [`grammar`] - delimiter levels (`---`, `#### label ####`, `----`)
//! - [`decode`] - text to flat record, with numeric and list fixups
//! - [`encode`] - flat record to text, region by region
//! - [`others`] - YAML block for unclassified fields

pub mod decode;
pub mod encode;
pub mod grammar;
pub mod others;

pub use decode::{coerce_integer, decode, NULL_TOKEN};
pub use encode::encode;

use crate::fields::{FieldKind, EVENT_SCALAR_FIELDS, SCALAR_FIELDS};

/// Lektor model of a document, written as its `_model` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    Event,
    Video,
}

impl Model {
    /// Value of the `_model` field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Video => "video",
        }
    }

    /// Scalar fields of this model, in output order.
    pub fn scalar_fields(self) -> &'static [&'static str] {
        match self {
            Self::Event => EVENT_SCALAR_FIELDS,
            Self::Video => SCALAR_FIELDS,
        }
    }

    /// Classify a field for this model.
    pub fn classify(self, name: &str) -> FieldKind {
        match self {
            Self::Event => FieldKind::of_event(name),
            Self::Video => FieldKind::of(name),
        }
    }
}
