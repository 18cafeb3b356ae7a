//! Logging setup
//!
//! Leveled text records with timestamp, level and target go to stdout and
//! are appended to a log file. The filter comes from `RUST_LOG`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "reviewbell_notifier=debug,reviewbell_client=debug";

/// Installs the global subscriber
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
///
/// # Errors
/// Fails if the log file cannot be created or opened.
pub fn init(log_file: &str) -> Result<WorkerGuard> {
    let appender = file_appender(log_file)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    Ok(guard)
}

/// Opens `log_file` for appending, without rotation
fn file_appender(log_file: &str) -> Result<RollingFileAppender> {
    let (directory, file_name) = split_log_path(log_file);
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .with_context(|| format!("Failed to open log file {}", log_file))
}

/// Splits a log path into directory and file name
fn split_log_path(log_file: &str) -> (&Path, &str) {
    let path = Path::new(log_file);
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(crate::config::DEFAULT_LOG_FILE);
    (directory, file_name)
}
