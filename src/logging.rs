//! Tracing subscriber setup shared by both binaries

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Where formatted events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// Keeps stdout free for the interactive menu
    Stderr,
}

fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("barberia={},tower_http=debug", config.level).into())
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
pub fn init(config: &LoggingConfig, target: LogTarget) {
    let json = config.format.eq_ignore_ascii_case("json");
    let registry = tracing_subscriber::registry().with(filter(config));

    match (json, target) {
        (true, LogTarget::Stdout) => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        (true, LogTarget::Stderr) => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        (false, LogTarget::Stdout) => registry.with(tracing_subscriber::fmt::layer()).init(),
        (false, LogTarget::Stderr) => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
