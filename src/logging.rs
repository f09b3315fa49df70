//! File logging.  The terminal belongs to the UI, so log records only ever
//! go to rotating files, and only when a log directory is configured.

use anyhow::Context;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use std::path::Path;
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "calnotes";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unsupported log level {0:?}; expected trace|debug|info|warn|error")]
pub(crate) struct LogLevelError(String);

/// Starts logging to files in `log_dir`.  Records are written for as long as
/// the returned handle is alive.
pub(crate) fn init_logging(level: &str, log_dir: &Path) -> anyhow::Result<LoggerHandle> {
    let level = normalize_level(level)?;
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let handle = Logger::try_with_str(level)
        .with_context(|| format!("invalid log level {level:?}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;
    log::info!(
        "event=logging_start level={level} log_dir={} version={}",
        log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, LogLevelError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(LogLevelError(level.to_owned())),
    }
}
