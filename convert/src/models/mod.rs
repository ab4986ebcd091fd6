//! Domain models: events and the videos they own.
//!
//! - [`Event`] - a conference or meetup, named after its directory
//! - [`Video`] - one recorded talk of an event
//!
//! Both keep their metadata as an open-ended flat record; the field
//! classification only matters when rendering to the lektor format.

use serde_json::{Map, Value};

use crate::cms::{self, Model};
use crate::error::{CmsResult, TreeResult};
use crate::tree;

/// Flat metadata record shared by both formats.
pub type Record = Map<String, Value>;

// =============================================================================
// Video
// =============================================================================

/// A single recorded talk.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    /// Slug, taken from the file or directory name.
    pub name: String,
    /// Metadata fields.
    pub data: Record,
}

impl Video {
    /// Create a video, filling in `length: null` on media records that lack it.
    pub fn new(name: impl Into<String>, mut data: Record) -> Self {
        if let Some(Value::Array(media)) = data.get_mut("videos") {
            for entry in media.iter_mut().filter_map(Value::as_object_mut) {
                entry.entry("length").or_insert(Value::Null);
            }
        }
        Self {
            name: name.into(),
            data,
        }
    }

    /// Render as pyvideo JSON.
    pub fn to_json(&self) -> TreeResult<String> {
        tree::encode(&self.data)
    }

    /// Render as a lektor `contents.lr` document.
    pub fn to_cms(&self) -> CmsResult<String> {
        cms::encode(Model::Video, &self.data)
    }
}

// =============================================================================
// Event
// =============================================================================

/// A conference or meetup with its videos.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Slug, taken from the directory name.
    pub name: String,
    /// Metadata fields.
    pub data: Record,
    videos: Vec<Video>,
}

impl Event {
    /// Create an event without videos.
    pub fn new(name: impl Into<String>, data: Record) -> Self {
        Self {
            name: name.into(),
            data,
            videos: Vec::new(),
        }
    }

    /// Add a video. A video with the same name is replaced in place.
    pub fn add_video(&mut self, name: impl Into<String>, data: Record) {
        let video = Video::new(name, data);
        match self.videos.iter_mut().find(|v| v.name == video.name) {
            Some(existing) => *existing = video,
            None => self.videos.push(video),
        }
    }

    /// Videos in insertion order.
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    /// Look up a video by name.
    pub fn video(&self, name: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.name == name)
    }

    pub fn video_count(&self) -> usize {
        self.videos.len()
    }

    /// Render as pyvideo JSON (`category.json`).
    pub fn to_json(&self) -> TreeResult<String> {
        tree::encode(&self.data)
    }

    /// Render as a lektor `contents.lr` document.
    pub fn to_cms(&self) -> CmsResult<String> {
        cms::encode(Model::Event, &self.data)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_media_length_defaults_to_null() {
        let video = Video::new(
            "keynote",
            record(json!({ "videos": [
                { "url": "http://x", "type": "mp4" },
                { "url": "http://y", "type": "mp4", "length": 12 },
            ]})),
        );
        assert_eq!(video.data["videos"][0]["length"], Value::Null);
        assert_eq!(video.data["videos"][1]["length"], 12);
    }

    #[test]
    fn test_add_video_overwrites_duplicates() {
        let mut event = Event::new("pycon", Record::new());
        event.add_video("a", record(json!({ "title": "first" })));
        event.add_video("b", record(json!({ "title": "second" })));
        event.add_video("a", record(json!({ "title": "replaced" })));

        assert_eq!(event.video_count(), 2);
        let names: Vec<_> = event.videos().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(event.video("a").unwrap().data["title"], "replaced");
    }

    #[test]
    fn test_event_to_json_sorted() {
        let event = Event::new(
            "pycon-2019",
            record(json!({ "title": "PyCon 2019", "description": "desc" })),
        );
        assert_eq!(
            event.to_json().unwrap(),
            "{\n  \"description\": \"desc\",\n  \"title\": \"PyCon 2019\"\n}\n"
        );
    }

    #[test]
    fn test_event_to_cms_has_no_others() {
        let event = Event::new(
            "pycon-2019",
            record(json!({ "title": "PyCon 2019", "description": "desc" })),
        );
        let text = event.to_cms().unwrap();
        assert!(text.contains("title: PyCon 2019"));
        assert!(text.contains("description: desc"));
        assert!(!text.contains("others"));
    }

    #[test]
    fn test_video_to_cms_blocks() {
        let video = Video::new(
            "keynote",
            record(json!({
                "title": "Keynote",
                "speakers": ["Jane Doe"],
                "videos": [{ "url": "http://v", "type": "mp4" }],
            })),
        );
        let text = video.to_cms().unwrap();
        assert!(text.contains("title: Keynote"));
        assert!(text.contains("speakers:\n\n#### text ####\ntext: Jane Doe"));
        assert!(text.contains("#### video ####\nurl: http://v\n----\ntype: mp4\n----\nlength: None"));
    }
}
