//! Repositories: where events and videos live on disk.
//!
//! A [`Repository`] knows how to enumerate events, read one event with its
//! videos, and where to write each entity. Reading with a filter and saving
//! a whole collection are shared by every layout.
//!
//! - [`TreeRepository`] - pyvideo JSON data tree
//! - [`CmsRepository`] - lektor `content/events` tree

pub mod cms;
pub mod tree;

pub use cms::CmsRepository;
pub use tree::TreeRepository;

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConvertError, ConvertResult};
use crate::models::{Event, Video};
use crate::store;

// =============================================================================
// Event Filter
// =============================================================================

/// Allow-list of event names. An empty filter allows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    names: BTreeSet<String>,
}

impl EventFilter {
    /// Filter that lets every event through.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter restricted to the given names.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| !name.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated list, as given on the command line.
    pub fn parse(list: &str) -> Self {
        Self::only(list.split(',').map(str::trim))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether an event with this name should be read.
    pub fn allows(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.contains(name)
    }

    /// Names of the filter that matched none of `events`.
    pub fn unmatched(&self, events: &[Event]) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| !events.iter().any(|e| &e.name == *name))
            .cloned()
            .collect()
    }
}

// =============================================================================
// Save Statistics
// =============================================================================

/// Number of files written by [`Repository::save`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SaveStats {
    pub events: usize,
    pub videos: usize,
}

// =============================================================================
// Repository
// =============================================================================

/// An on-disk layout of events and videos.
pub trait Repository {
    /// Short name of the layout, for logs.
    fn kind(&self) -> &'static str;

    /// Root directory of the repository.
    fn root(&self) -> &Path;

    /// All events on disk as `(name, directory)`, sorted by path.
    fn event_list(&self) -> ConvertResult<Vec<(String, PathBuf)>>;

    /// Read one event and all of its videos.
    fn read_event(&self, name: &str, dir: &Path) -> ConvertResult<Event>;

    /// Where and what to write for an event.
    fn event_save_data(&self, event: &Event) -> ConvertResult<(PathBuf, String)>;

    /// Where and what to write for a video, given the event's file path.
    fn video_save_data(&self, event_path: &Path, video: &Video)
        -> ConvertResult<(PathBuf, String)>;

    /// Read every event allowed by `filter`.
    fn read_events(&self, filter: &EventFilter) -> ConvertResult<Vec<Event>> {
        let mut events = Vec::new();
        for (name, dir) in self.event_list()? {
            if !filter.allows(&name) {
                debug!("skipping event {} (not in filter)", name);
                continue;
            }
            events.push(self.read_event(&name, &dir)?);
        }
        Ok(events)
    }

    /// Write every event, then each of its videos. Existing files are
    /// overwritten.
    fn save(&self, events: &[Event]) -> ConvertResult<SaveStats> {
        let mut stats = SaveStats::default();
        for event in events {
            let (event_path, text) = self.event_save_data(event)?;
            store::write_text(&event_path, &text)?;
            debug!("> {}", event_path.display());
            stats.events += 1;

            for video in event.videos() {
                let (video_path, text) = self.video_save_data(&event_path, video)?;
                store::write_text(&video_path, &text)?;
                debug!("> {}", video_path.display());
                stats.videos += 1;
            }
        }
        Ok(stats)
    }
}

/// Name of the directory containing `path`.
pub(crate) fn parent_name(path: &Path) -> ConvertResult<(String, PathBuf)> {
    let dir = path
        .parent()
        .ok_or_else(|| ConvertError::UnnamedEntity(path.to_path_buf()))?;
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ConvertError::UnnamedEntity(path.to_path_buf()))?;
    Ok((name.to_string(), dir.to_path_buf()))
}

/// Directory containing an entity file.
pub(crate) fn containing_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}
