//! Logging setup
//!
//! Structured output to stdout, filtered through `RUST_LOG` (default `info`).

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Install the global subscriber; call once from `main`
pub fn init_logging() {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(stdout_layer)
        .init();
}
