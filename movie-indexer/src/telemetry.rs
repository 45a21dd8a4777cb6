//! Optional file sink for logs.
//!
//! When `LOG_FILE` is set, every event that passes the filter is also appended
//! to that file, without ANSI colors, alongside the console output.

use std::path::Path;

use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{registry::LookupSpan, Layer};

use crate::IndexingError;

/// Environment variable naming the log file.
pub const LOG_FILE_ENV: &str = "LOG_FILE";

/// Open a non-blocking writer appending to `path`, creating parent directories.
///
/// The returned guard flushes buffered lines when dropped and must be held for
/// as long as logging should reach the file.
pub fn file_writer(path: &Path) -> Result<(NonBlocking, WorkerGuard), IndexingError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            IndexingError::config(format!(
                "{} '{}' has no file name",
                LOG_FILE_ENV,
                path.display()
            ))
        })?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|e| {
            IndexingError::config(format!(
                "Failed to open log file '{}': {}",
                path.display(),
                e
            ))
        })?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Plain-text formatting layer writing to `writer`.
pub fn file_layer<S>(writer: NonBlocking) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
}
