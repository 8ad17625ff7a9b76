//! Log subscriber setup.
//!
//! Events from `tracing` macros are formatted by `tracing-subscriber`'s fmt
//! layer and written through a rotating [`FileWriter`]. The terminal is never
//! written to, since the dashboard owns it.

use super::file_writer::FileWriter;
use crate::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "dashboard.log";

/// Resolves the filter directive: `RUST_LOG`, then `trace_level`, then `"info"`.
#[must_use]
pub fn filter_directive(env: Option<String>, config: &Config) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| "info".to_string())
}

/// Initializes the global subscriber.
///
/// Returns the log file path, or `None` when logging stays disabled: the data
/// directory cannot be created, or a subscriber is already installed. Safe to
/// call more than once.
pub fn init_logging(config: &Config) -> Option<PathBuf> {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), config);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let log_file = data_dir.join(LOG_FILE_NAME);
    let writer = Arc::new(FileWriter::new(log_file.clone()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .ok()
        .map(|()| log_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wins_over_config() {
        let config = Config {
            trace_level: Some("debug".into()),
            ..Config::default()
        };
        assert_eq!(filter_directive(Some("warn".into()), &config), "warn");
        assert_eq!(filter_directive(Some("  ".into()), &config), "debug");
        assert_eq!(filter_directive(None, &config), "debug");
        assert_eq!(filter_directive(None, &Config::default()), "info");
    }
}
