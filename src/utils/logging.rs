//! Structured logging setup
//!
//! Thin wrapper around `tracing-subscriber`. Libraries embedding this crate
//! normally install their own subscriber; these helpers cover standalone
//! tools and tests.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Initialize logging from `RUST_LOG`, defaulting to `info`.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init() {
    init_with_config(&LoggingConfig::default());
}

/// Initialize logging with an explicit configuration.
pub fn init_with_config(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string().to_lowercase()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // try_init: another subscriber may already be installed
    let _ = subscriber.try_init();
}
