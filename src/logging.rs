//! Logging setup
//!
//! The terminal belongs to the UI, so log lines go to a daily rolling file
//! under `~/.shelter-tui/logs/` instead of stderr.

use crate::config::Config;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `shelter_tui=debug`
pub const LOG_ENV: &str = "SHELTER_LOG";

const LOG_FILE_PREFIX: &str = "shelter-tui.log";

pub fn log_dir() -> Option<PathBuf> {
    Config::config_dir().map(|dir| dir.join("logs"))
}

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines when dropped; keep it alive
/// until the application exits.
pub fn init(config: &Config) -> anyhow::Result<WorkerGuard> {
    let dir = log_dir().ok_or_else(|| anyhow::anyhow!("Could not determine log directory"))?;
    fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    fmt()
        .with_env_filter(filter_for(config))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(guard)
}

fn filter_for(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(&config.log_level))
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}
