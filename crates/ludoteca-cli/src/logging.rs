//! Logging configuration with rolling file appender
//!
//! Console output goes to stderr so that listings on stdout stay pipeable.
//! Logs are stored in ~/.local/share/ludoteca/logs/

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Get the logs directory path
pub fn logs_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.data_dir().join("ludoteca").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Filter used when RUST_LOG is unset, raised one step per `-v`
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn,ludoteca=info",
        1 => "info,ludoteca=debug",
        _ => "info,ludoteca=trace",
    }
}

/// Initialize logging with both console and rolling file output.
///
/// RUST_LOG wins over `verbosity` when set.
pub fn init_logging(verbosity: u8) -> tracing_appender::non_blocking::WorkerGuard {
    let logs_dir = logs_dir();

    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Warning: Failed to create logs directory: {}", e);
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "ludoteca-cli.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
