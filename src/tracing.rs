//! Logging setup
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs on stderr
//! - `RUST_LOG=rowscope::preview=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/rowscope/logs/rowscope.log` with daily
//! rotation, always at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths;

/// Initialize tracing subscriber with console and file logging
///
/// The terminal belongs to the picker, so the console layer only exists when
/// RUST_LOG is set, and it writes to stderr.
pub fn init() {
    let console_layer = EnvFilter::try_from_default_env().ok().map(|console_filter| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true)
            .with_filter(console_filter)
    });

    // File layer - always debug level for troubleshooting
    let file_layer = match config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, config_paths::LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
