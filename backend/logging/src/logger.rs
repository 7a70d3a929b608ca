//! Structured Logger
//!
//! Wraps `tracing` with a console layer and an optional rolling JSON file
//! layer, with environment-based level control.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Rolling files are named `relight.log.YYYY-MM-DD`.
pub const LOG_FILE_PREFIX: &str = "relight.log";

/// `RUST_LOG` when set and parseable, otherwise `level`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global structured logger.
///
/// Console output goes to stderr so stdout stays free for command output.
/// When `log_dir` is given, NDJSON is also written to a daily rolling file.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logger(level: &str, log_dir: Option<&Path>) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let file_layer = log_dir.map(|dir| {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
