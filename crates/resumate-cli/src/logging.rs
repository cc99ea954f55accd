//! Tracing bootstrap for the CLI.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use resumate_core::config::DEFAULT_LOG_LEVEL;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init(level: Option<&str>) {
    let level = level.unwrap_or(DEFAULT_LOG_LEVEL);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
