//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; a binary or test harness picks
//! one of the initializers below to see them.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogConfig;

/// Installs a human-readable subscriber.
///
/// `RUST_LOG` sets the filter (default `info`), e.g.
/// `RUST_LOG=alloc_configurator=debug`.
///
/// ```no_run
/// alloc_configurator::logging::init();
/// ```
pub fn init() {
    init_with(&LogConfig::default());
}

/// Installs a subscriber from config. `RUST_LOG` still takes precedence over
/// `config.level`.
pub fn init_with(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    if config.json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .init();
    }
}

/// Installs a debug-level subscriber that writes through the test harness.
/// Safe to call from every test.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
