//! Structured logging to a file (§10.1). Never logs to stdout/stderr: both
//! are claimed by the alternate screen while the TUI is running, so a log
//! line written there would corrupt the display. Uses a `tracing-appender`
//! non-blocking file writer so a log call never stalls the render loop.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Must be kept alive for the process lifetime; dropping it stops the
/// background flush thread and buffered log lines are lost.
pub fn init(log_path: &Path) -> color_eyre::eyre::Result<WorkerGuard> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new().create(true).append(true).open(log_path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false).with_target(true);

    tracing_subscriber::registry().with(env_filter).with(file_layer).init();

    Ok(guard)
}
