//! Logging setup for the drills binary.
//!
//! Two outputs:
//!
//! - **Console**: standard error, `warn` and above by default, so drill output
//!   on standard output is never mixed with log lines.
//! - **File**: `drills.<date>.log` in the platform data directory, `info` and
//!   above, rotated daily with 10 files kept.
//!
//! `RUST_LOG` overrides both levels.
//!
//! ```no_run
//! drills::logging::init().expect("Failed to initialize logging");
//! tracing::info!("drill started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/drills/logs`
/// - macOS: `~/Library/Application Support/drills/logs`
/// - Linux: `~/.local/share/drills/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;

    let log_dir = base_dir.join("drills").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

fn filter_or(default: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .context("Failed to create env filter")
}

/// Initializes console and file logging.
///
/// # Errors
///
/// Returns error if the log directory or the file appender cannot be created.
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix("drills")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create log file appender")?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter_or("warn")?);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_appender)
        .with_filter(filter_or("info")?);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!("Logging initialized, log directory: {:?}", log_dir);

    Ok(())
}

/// Gets the path to today's log file
pub fn get_current_log_path() -> Result<PathBuf> {
    let log_dir = get_log_dir()?;
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    Ok(log_dir.join(format!("drills.{today}.log")))
}
