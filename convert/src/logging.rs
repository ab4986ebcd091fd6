//! Logging setup.
//!
//! Human-readable `tracing` output on stderr. `RUST_LOG` wins when set;
//! otherwise the level comes from the run configuration.

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Registry,
};

use crate::config::RunConfig;

/// Initialize the global subscriber. Calling it twice is an error.
pub fn init_tracing(config: &RunConfig) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.log_level().to_string().to_lowercase();
        EnvFilter::new(format!("pyvideo_convert={level}"))
    });

    let formatting_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    Registry::default()
        .with(env_filter)
        .with(formatting_layer)
        .try_init()?;

    tracing::debug!(
        direction = ?config.direction,
        verbose = config.verbose,
        "Logging initialized"
    );

    Ok(())
}
