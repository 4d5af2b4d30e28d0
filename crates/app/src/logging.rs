//! Tracing setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the log filter. An explicit `--log-level` wins over `RUST_LOG`,
/// which wins over the configured level.
#[must_use]
pub fn filter(cli_level: Option<&str>, configured_level: &str) -> EnvFilter {
    match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level)),
    }
}

/// Installs the global subscriber. Logs go to stderr so that reports printed
/// on stdout stay machine-readable.
pub fn init(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
