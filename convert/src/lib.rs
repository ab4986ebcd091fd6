//! # pyvideo-convert - pyvideo JSON data <-> lektor content
//!
//! Copies conference talk metadata between the pyvideo data repository
//! (one JSON file per event and per video) and the lektor site that
//! renders it (one `contents.lr` file per page).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Repository  │────▶│ Event/Video  │────▶│    Codec     │────▶│  Repository  │
//! │   (origin)   │     │   (models)   │     │ (tree / cms) │     │ (destination)│
//! └──────────────┘     └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pyvideo_convert::{run, Direction, RunConfig};
//!
//! let config = RunConfig::new("pyvideo-data", "pyvideo-lektor", Direction::PyvideoToLektor);
//! let report = run(&config)?;
//! println!("Converted {} events", report.written.events);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Layered error types
//! - [`fields`] - Field classification
//! - [`cms`] - Lektor `contents.lr` codec
//! - [`tree`] - Canonical JSON codec
//! - [`models`] - Domain models (Event, Video)
//! - [`store`] - File listing, reading and writing
//! - [`repository`] - On-disk layouts
//! - [`convert`] - Conversion driver
//! - [`config`] / [`logging`] - Run configuration and tracing setup

// Core modules
pub mod error;
pub mod fields;
pub mod models;

// Codecs
pub mod cms;
pub mod tree;

// Storage
pub mod repository;
pub mod store;

// Driver
pub mod config;
pub mod convert;
pub mod logging;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CmsError, CmsResult, ConvertError, ConvertResult, StoreError, StoreResult, TreeError,
    TreeResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use fields::FieldKind;
pub use models::{Event, Record, Video};

// =============================================================================
// Re-exports - Repositories
// =============================================================================

pub use repository::{CmsRepository, EventFilter, Repository, SaveStats, TreeRepository};

// =============================================================================
// Re-exports - Driver
// =============================================================================

pub use config::{Direction, RunConfig};
pub use convert::{convert, run, ConvertReport};
pub use logging::init_tracing;
