//! Lektor content tree.
//!
//! ```text
//! <root>/content/events/<event>/contents.lr
//! <root>/content/events/<event>/<video>/contents.lr
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;

use super::{containing_dir, parent_name, Repository};
use crate::cms;
use crate::error::{ConvertError, ConvertResult};
use crate::models::{Event, Record, Video};
use crate::store;

/// Lektor's file name for a page.
pub const CONTENTS_FILE: &str = "contents.lr";

/// Lektor content tree rooted at a lektor project.
#[derive(Debug, Clone)]
pub struct CmsRepository {
    root: PathBuf,
}

impl CmsRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding one sub-directory per event.
    pub fn events_dir(&self) -> PathBuf {
        self.root.join("content").join("events")
    }

    fn read_contents(path: &Path) -> ConvertResult<Record> {
        let text = store::read_text(path)?;
        cms::decode(&text).map_err(|source| ConvertError::MalformedCms {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Repository for CmsRepository {
    fn kind(&self) -> &'static str {
        "lektor"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn event_list(&self) -> ConvertResult<Vec<(String, PathBuf)>> {
        let pattern = store::pattern(&self.events_dir(), &format!("*/{CONTENTS_FILE}"));
        store::list(&pattern)?
            .iter()
            .map(|path| parent_name(path))
            .collect()
    }

    fn read_event(&self, name: &str, dir: &Path) -> ConvertResult<Event> {
        let data = Self::read_contents(&dir.join(CONTENTS_FILE))?;
        debug!("< {}", name);
        let mut event = Event::new(name, data);

        let pattern = store::pattern(dir, &format!("*/{CONTENTS_FILE}"));
        for video_path in store::list(&pattern)? {
            let (video_name, _) = parent_name(&video_path)?;
            let video_data = Self::read_contents(&video_path)?;
            debug!("< {}", video_path.display());
            event.add_video(video_name, video_data);
        }

        Ok(event)
    }

    fn event_save_data(&self, event: &Event) -> ConvertResult<(PathBuf, String)> {
        let path = self.events_dir().join(&event.name).join(CONTENTS_FILE);
        let text = event.to_cms().map_err(|source| ConvertError::EncodeCms {
            entity: format!("event {}", event.name),
            source,
        })?;
        Ok((path, text))
    }

    fn video_save_data(
        &self,
        event_path: &Path,
        video: &Video,
    ) -> ConvertResult<(PathBuf, String)> {
        let path = containing_dir(event_path)
            .join(&video.name)
            .join(CONTENTS_FILE);
        let text = video.to_cms().map_err(|source| ConvertError::EncodeCms {
            entity: format!("video {}", video.name),
            source,
        })?;
        Ok((path, text))
    }
}
