//! Conversion driver.
//!
//! Reads every (filtered) event from the origin repository and writes the
//! whole collection to the destination. Any read or decode error aborts the
//! run before anything is written.
//!
//! # Example
//!
//! ```rust,ignore
//! use pyvideo_convert::{convert, CmsRepository, EventFilter, TreeRepository};
//!
//! let origin = TreeRepository::new("pyvideo-data");
//! let destination = CmsRepository::new("pyvideo-lektor");
//! let report = convert(&origin, &destination, &EventFilter::parse("pycon-2019"))?;
//! println!("{} events written", report.written.events);
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{Direction, RunConfig};
use crate::error::ConvertResult;
use crate::repository::{CmsRepository, EventFilter, Repository, SaveStats, TreeRepository};

/// Outcome of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvertReport {
    /// Events read from the origin.
    pub events_read: usize,
    /// Videos read from the origin.
    pub videos_read: usize,
    /// Files written to the destination.
    pub written: SaveStats,
    /// Filter names that matched no event in the origin.
    pub unmatched: Vec<String>,
}

/// Convert from `origin` to `destination`, restricted to `filter`.
pub fn convert(
    origin: &dyn Repository,
    destination: &dyn Repository,
    filter: &EventFilter,
) -> ConvertResult<ConvertReport> {
    info!(
        "Reading {} repository at {}",
        origin.kind(),
        origin.root().display()
    );
    let events = origin.read_events(filter)?;
    let videos_read = events.iter().map(|e| e.video_count()).sum::<usize>();
    info!("Read {} events, {} videos", events.len(), videos_read);

    let unmatched = filter.unmatched(&events);
    for name in &unmatched {
        warn!("Event '{}' not found in {} repository", name, origin.kind());
    }

    info!(
        "Writing {} repository at {}",
        destination.kind(),
        destination.root().display()
    );
    let written = destination.save(&events)?;
    info!("Wrote {} events, {} videos", written.events, written.videos);

    Ok(ConvertReport {
        events_read: events.len(),
        videos_read,
        written,
        unmatched,
    })
}

/// Run the conversion described by `config`.
pub fn run(config: &RunConfig) -> ConvertResult<ConvertReport> {
    if config.debug {
        warn!("--debug given: no interactive debugger is available, continuing");
    }

    let pyvideo = TreeRepository::new(&config.pyvideo_path);
    let lektor = CmsRepository::new(&config.lektor_path);

    let report = match config.direction {
        Direction::PyvideoToLektor => convert(&pyvideo, &lektor, &config.events)?,
        Direction::LektorToPyvideo => convert(&lektor, &pyvideo, &config.events)?,
    };

    match run_summary(config.direction, &report) {
        Ok(summary) => debug!("Run summary: {}", summary),
        Err(e) => warn!("Cannot serialize run summary: {}", e),
    }

    Ok(report)
}

/// Report of a run together with its direction.
#[derive(Serialize)]
struct RunSummary<'a> {
    direction: Direction,
    #[serde(flatten)]
    report: &'a ConvertReport,
}

/// One-line JSON summary of a finished run.
fn run_summary(direction: Direction, report: &ConvertReport) -> serde_json::Result<String> {
    serde_json::to_string(&RunSummary { direction, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;
    use tempfile::tempdir;

    #[test]
    fn test_run_pyvideo_to_lektor() {
        let data = tempdir().unwrap();
        let site = tempdir().unwrap();
        store::write_text(
            &data.path().join("ev/category.json"),
            r#"{"title": "Ev"}"#,
        )
        .unwrap();
        store::write_text(
            &data.path().join("ev/videos/talk.json"),
            r#"{"title": "Talk"}"#,
        )
        .unwrap();

        let config = RunConfig::new(data.path(), site.path(), Direction::PyvideoToLektor);
        let report = run(&config).unwrap();

        assert_eq!(report.events_read, 1);
        assert_eq!(report.videos_read, 1);
        assert_eq!(report.written, SaveStats { events: 1, videos: 1 });
        assert!(site
            .path()
            .join("content/events/ev/talk/contents.lr")
            .exists());
    }

    #[test]
    fn test_unmatched_filter_names_reported() {
        let data = tempdir().unwrap();
        let site = tempdir().unwrap();
        store::write_text(&data.path().join("ev/category.json"), "{}").unwrap();

        let config = RunConfig::new(data.path(), site.path(), Direction::PyvideoToLektor)
            .with_events(EventFilter::parse("ev,missing"));
        let report = run(&config).unwrap();

        assert_eq!(report.events_read, 1);
        assert_eq!(report.unmatched, vec!["missing".to_string()]);
    }

    #[test]
    fn test_run_summary_json() {
        let report = ConvertReport {
            events_read: 1,
            videos_read: 2,
            written: SaveStats { events: 1, videos: 2 },
            unmatched: vec!["missing".to_string()],
        };
        let summary: serde_json::Value =
            serde_json::from_str(&run_summary(Direction::LektorToPyvideo, &report).unwrap())
                .unwrap();

        assert_eq!(
            summary,
            serde_json::json!({
                "direction": "lektor_to_pyvideo",
                "events_read": 1,
                "videos_read": 2,
                "written": { "events": 1, "videos": 2 },
                "unmatched": ["missing"],
            })
        );
    }

    #[test]
    fn test_decode_error_aborts_before_writing() {
        let data = tempdir().unwrap();
        let site = tempdir().unwrap();
        store::write_text(&data.path().join("a/category.json"), "{}").unwrap();
        store::write_text(&data.path().join("b/category.json"), "not json").unwrap();

        let config = RunConfig::new(data.path(), site.path(), Direction::PyvideoToLektor);
        let err = run(&config).unwrap_err();

        assert!(err.to_string().contains("category.json"));
        assert!(!site.path().join("content").exists());
    }
}
