//! pyvideo-convert CLI - Copy pyvideo data to lektor content and back
//!
//! ```bash
//! pyvideo-convert data/ site/ --pyvideo_to_lektor            # JSON tree -> lektor
//! pyvideo-convert data/ site/ --lektor_to_pyvideo            # lektor -> JSON tree
//! pyvideo-convert data/ site/ --pyvideo_to_lektor -e a,b -v  # only events a and b
//! ```

use clap::{ArgGroup, Parser};
use pyvideo_convert::{init_tracing, run, Direction, EventFilter, RunConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pyvideo-convert")]
#[command(about = "Convert pyvideo JSON data to lektor contents and vice versa", long_about = None)]
#[command(group(
    ArgGroup::new("direction")
        .required(true)
        .args(["pyvideo_to_lektor", "lektor_to_pyvideo"])
))]
struct Cli {
    /// Path to the pyvideo data repository
    pyvideo_path: PathBuf,

    /// Path to the pyvideo lektor project
    lektor_path: PathBuf,

    /// Event directory names, separated by commas
    #[arg(short, long, default_value = "")]
    events: String,

    /// Increase output verbosity
    #[arg(short, long)]
    verbose: bool,

    /// Stop for debugging (accepted for compatibility, only logged)
    #[arg(short, long)]
    debug: bool,

    /// Read the JSON tree and write lektor contents
    #[arg(long = "pyvideo_to_lektor")]
    pyvideo_to_lektor: bool,

    /// Read lektor contents and write the JSON tree
    #[arg(long = "lektor_to_pyvideo")]
    lektor_to_pyvideo: bool,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let direction = if cli.lektor_to_pyvideo {
            Direction::LektorToPyvideo
        } else {
            Direction::PyvideoToLektor
        };

        RunConfig::new(cli.pyvideo_path, cli.lektor_path, direction)
            .with_events(EventFilter::parse(&cli.events))
            .with_verbose(cli.verbose)
            .with_debug(cli.debug)
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let config = RunConfig::from(Cli::parse());

    if let Err(e) = init_tracing(&config) {
        eprintln!("⚠️  Logging disabled: {}", e);
    }

    match run(&config) {
        Ok(report) => {
            eprintln!(
                "✨ Done: {} events, {} videos written",
                report.written.events, report.written.videos
            );
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}
