//! Pyvideo JSON data tree.
//!
//! ```text
//! <root>/<event>/category.json
//! <root>/<event>/videos/<video>.json
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;

use super::{containing_dir, parent_name, Repository};
use crate::error::{ConvertError, ConvertResult};
use crate::models::{Event, Video};
use crate::store;

/// Event file name inside each event directory.
pub const EVENT_FILE: &str = "category.json";

/// Sub-directory holding one JSON file per video.
pub const VIDEOS_DIR: &str = "videos";

/// Directory name prefixes that never hold events (`.git`, `_templates`, ...).
const RESERVED_PREFIXES: &[char] = &['.', '_'];

/// JSON data tree rooted at a pyvideo data checkout.
#[derive(Debug, Clone)]
pub struct TreeRepository {
    root: PathBuf,
}

impl TreeRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Repository for TreeRepository {
    fn kind(&self) -> &'static str {
        "pyvideo"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn event_list(&self) -> ConvertResult<Vec<(String, PathBuf)>> {
        let pattern = store::pattern(&self.root, &format!("*/{EVENT_FILE}"));
        let mut events = Vec::new();
        for path in store::list(&pattern)? {
            let (name, dir) = parent_name(&path)?;
            if name.starts_with(RESERVED_PREFIXES) {
                continue;
            }
            events.push((name, dir));
        }
        Ok(events)
    }

    fn read_event(&self, name: &str, dir: &Path) -> ConvertResult<Event> {
        let data = store::read_json(&dir.join(EVENT_FILE))?;
        debug!("< {}", name);
        let mut event = Event::new(name, data);

        let pattern = store::pattern(&dir.join(VIDEOS_DIR), "*.json");
        for video_path in store::list(&pattern)? {
            let video_name = video_path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| ConvertError::UnnamedEntity(video_path.clone()))?
                .to_string();
            let video_data = store::read_json(&video_path)?;
            debug!("< {}", video_path.display());
            event.add_video(video_name, video_data);
        }

        Ok(event)
    }

    fn event_save_data(&self, event: &Event) -> ConvertResult<(PathBuf, String)> {
        let path = self.root.join(&event.name).join(EVENT_FILE);
        let text = event.to_json().map_err(|source| ConvertError::EncodeJson {
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
            .join(VIDEOS_DIR)
            .join(format!("{}.json", video.name));
        let text = video.to_json().map_err(|source| ConvertError::EncodeJson {
            entity: format!("video {}", video.name),
            source,
        })?;
        Ok((path, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::EventFilter;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, text: &str) {
        store::write_text(&root.join(rel), text).unwrap();
    }

    #[test]
    fn test_event_list_skips_reserved_dirs() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pycon-2019/category.json", "{}");
        write(dir.path(), ".github/category.json", "{}");
        write(dir.path(), "_drafts/category.json", "{}");

        let repo = TreeRepository::new(dir.path());
        let names: Vec<_> = repo
            .event_list()
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["pycon-2019"]);
    }

    #[test]
    fn test_read_event_with_videos() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pycon-2019/category.json", r#"{"title": "PyCon 2019"}"#);
        write(dir.path(), "pycon-2019/videos/keynote.json", r#"{"title": "Keynote"}"#);
        write(dir.path(), "pycon-2019/videos/lightning.json", r#"{"title": "Lightning"}"#);

        let repo = TreeRepository::new(dir.path());
        let events = repo.read_events(&EventFilter::all()).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].data["title"], "PyCon 2019");
        assert_eq!(events[0].video_count(), 2);
        assert_eq!(events[0].video("keynote").unwrap().data["title"], "Keynote");
    }

    #[test]
    fn test_malformed_json_names_file() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pycon-2019/category.json", "{}");
        write(dir.path(), "pycon-2019/videos/broken.json", "{ \"title\": ");

        let repo = TreeRepository::new(dir.path());
        let err = repo.read_events(&EventFilter::all()).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_save_paths() {
        let repo = TreeRepository::new("/data");
        let event = Event::new("pycon-2019", Default::default());
        let (event_path, _) = repo.event_save_data(&event).unwrap();
        assert_eq!(event_path, PathBuf::from("/data/pycon-2019/category.json"));

        let video = Video::new("keynote", Default::default());
        let (video_path, text) = repo.video_save_data(&event_path, &video).unwrap();
        assert_eq!(
            video_path,
            PathBuf::from("/data/pycon-2019/videos/keynote.json")
        );
        assert_eq!(text, "{}\n");
    }
}
