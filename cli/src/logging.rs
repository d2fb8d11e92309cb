use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{runtime_dir, LogLevel};

static INIT: OnceLock<()> = OnceLock::new();

/// Where log output goes. Stdout is reserved for status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stderr,
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

pub fn init(level: LogLevel, mode: LogMode, cli_override: Option<LogLevel>) -> LogGuard {
    let mut guard = None;

    INIT.get_or_init(|| {
        let Some(level) = cli_override.unwrap_or(level).as_tracing_level() else {
            return;
        };

        let layer = fmt::layer().with_timer(UtcTime::rfc_3339()).with_target(true);

        match mode.open_file() {
            Some((writer, file_guard)) => {
                guard = Some(file_guard);
                tracing_subscriber::registry()
                    .with(env_filter(level))
                    .with(layer.with_writer(writer).with_ansi(false).with_line_number(true))
                    .init();
            }
            None => {
                tracing_subscriber::registry()
                    .with(env_filter(level))
                    .with(layer.with_writer(std::io::stderr))
                    .init();
            }
        }
    });

    LogGuard { _guard: guard }
}

impl LogMode {
    /// Falls back to stderr when the log file cannot be created.
    fn open_file(self) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
        if self != LogMode::File {
            return None;
        }

        let log_dir = runtime_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("batstat: cannot create log directory {:?}: {}", log_dir, e);
            return None;
        }

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("batstat")
            .filename_suffix("log")
            .max_log_files(3)
            .build(&log_dir)
            .ok()?;

        Some(tracing_appender::non_blocking(appender))
    }
}

/// `RUST_LOG` directives win over the configured level.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_mode_opens_no_file() {
        assert!(LogMode::Stderr.open_file().is_none());
    }
}
