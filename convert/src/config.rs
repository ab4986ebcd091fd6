//! Run configuration.
//!
//! Built once from the command line and passed down to logging and the
//! conversion driver.

use serde::Serialize;
use std::path::PathBuf;
use tracing::Level;

use crate::repository::EventFilter;

/// Which way to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// JSON data tree -> lektor content.
    PyvideoToLektor,
    /// Lektor content -> JSON data tree.
    LektorToPyvideo,
}

/// Everything a conversion run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root of the pyvideo JSON data tree.
    pub pyvideo_path: PathBuf,
    /// Root of the lektor project.
    pub lektor_path: PathBuf,
    pub direction: Direction,
    /// Events to convert; applied to the origin repository.
    pub events: EventFilter,
    /// Log every file read and written.
    pub verbose: bool,
    /// Development stop requested on start. There is no interactive
    /// debugger to attach, so this only gets logged.
    pub debug: bool,
}

impl RunConfig {
    pub fn new(
        pyvideo_path: impl Into<PathBuf>,
        lektor_path: impl Into<PathBuf>,
        direction: Direction,
    ) -> Self {
        Self {
            pyvideo_path: pyvideo_path.into(),
            lektor_path: lektor_path.into(),
            direction,
            events: EventFilter::all(),
            verbose: false,
            debug: false,
        }
    }

    pub fn with_events(mut self, events: EventFilter) -> Self {
        self.events = events;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Default log level when `RUST_LOG` is not set.
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::new("data", "site", Direction::PyvideoToLektor);
        assert!(config.events.is_empty());
        assert_eq!(config.log_level(), Level::INFO);
    }

    #[test]
    fn test_verbose_raises_level() {
        let config =
            RunConfig::new("data", "site", Direction::LektorToPyvideo).with_verbose(true);
        assert_eq!(config.log_level(), Level::DEBUG);
    }
}
