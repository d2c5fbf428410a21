//! Diagnostic logging setup.
//!
//! The TUI owns the terminal, so diagnostics go to a daily-rolling file under
//! ${POSTERN_HOME}/logs instead of stderr. Filtering is controlled via the
//! POSTERN_LOG environment variable (default "info").

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes file-based logging.
///
/// Returns the appender worker guard; dropping it flushes buffered log lines,
/// so the caller must keep it alive for the lifetime of the process.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init() -> Result<WorkerGuard> {
    let logs_dir = crate::config::paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "postern.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("POSTERN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
