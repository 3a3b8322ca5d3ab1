//! Logging setup
//!
//! Human-readable output on stderr plus a daily rolling file in the data
//! directory. `RUST_LOG` overrides the default `info` filter.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::APP_NAME;

const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Directory that receives the rolling log files
pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_NAME).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process. Returns `None` if a subscriber was already set.
pub fn init_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_filter(EnvFilter::new(&filter));

    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Could not create log directory {}: {}", log_dir.display(), e);
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, format!("{}.log", APP_NAME));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new(&filter));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .ok()
        .map(|_| guard)
}
