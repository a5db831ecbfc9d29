//! Logger setup for the binaries.
//!
//! `RUST_LOG` wins when set; otherwise the fallback level is `info`. The
//! terminal game cannot share the screen with log output, so it writes to a
//! rotating file. Headless tools log to stderr.

use anyhow::Result;
use flexi_logger::{opt_format, Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::GameConfig;

pub const DEFAULT_LEVEL: &str = "info";

/// Log to `<log_dir>/tui-memory*.log`. Returns `None` when logging is disabled.
///
/// Keep the handle alive for the life of the process.
pub fn init_file_logging(config: &GameConfig) -> Result<Option<LoggerHandle>> {
    if config.log_disabled {
        return Ok(None);
    }

    let handle = Logger::try_with_env_or_str(DEFAULT_LEVEL)?
        .log_to_file(
            FileSpec::default()
                .directory(&config.log_dir)
                .basename("tui-memory"),
        )
        .format(opt_format)
        .rotate(
            Criterion::Size(10 * 1024 * 1024),
            Naming::Numbers,
            Cleanup::KeepLogFiles(3),
        )
        .start()?;
    Ok(Some(handle))
}

pub fn init_stderr_logging(config: &GameConfig) -> Result<Option<LoggerHandle>> {
    if config.log_disabled {
        return Ok(None);
    }

    let handle = Logger::try_with_env_or_str(DEFAULT_LEVEL)?
        .log_to_stderr()
        .format(opt_format)
        .start()?;
    Ok(Some(handle))
}
