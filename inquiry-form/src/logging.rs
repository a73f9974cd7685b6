use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file destination, returned so the app can tell the visitor where it is
pub struct LogHandle {
    pub path: PathBuf,
    _guard: WorkerGuard,
}

/// Initialize tracing with file-based logging.
/// Logs are written to <config dir>/inquiry-form/logs/inquiry-form-YYYY-MM-DD-HH-MM-SS.log
/// since the terminal itself belongs to the form.
pub fn init_logging() -> Result<LogHandle> {
    let logs_dir = dirs::config_dir()
        .ok_or(anyhow::anyhow!("Could not find config directory"))?
        .join("inquiry-form")
        .join("logs");

    init_logging_in(&logs_dir)
}

pub fn init_logging_in(logs_dir: &Path) -> Result<LogHandle> {
    std::fs::create_dir_all(logs_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_filename = format!("inquiry-form-{}.log", timestamp);
    let path = logs_dir.join(&log_filename);

    // Non-blocking so a slow disk never stalls the event loop
    let file_appender = tracing_appender::rolling::never(logs_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // Default to INFO, can be overridden with RUST_LOG
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()?;

    Ok(LogHandle {
        path,
        _guard: guard,
    })
}
