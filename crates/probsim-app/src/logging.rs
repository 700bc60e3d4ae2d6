use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;
use crate::debug::debug_enabled;

pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_path: PathBuf,
}

/// Installs a file-backed subscriber; the terminal itself belongs to the UI.
pub fn init_logging(logging: &LoggingConfig) -> Result<Option<LoggingGuard>> {
    let forced = debug_enabled();
    if !logging.enable_structured && !forced {
        return Ok(None);
    }

    let log_path = logging.file.clone();
    if let Some(dir) = log_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory at {}", dir.display()))?;
    }
    let file = File::create(&log_path)
        .with_context(|| format!("creating log file at {}", log_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let level = if forced {
        Level::DEBUG
    } else {
        logging.level().unwrap_or(Level::INFO)
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false)
        .with_writer(writer);

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    if logging.json {
        let _ = tracing::subscriber::set_global_default(
            builder.json().with_current_span(false).finish(),
        );
    } else {
        let _ = tracing::subscriber::set_global_default(builder.finish());
    }

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_path,
    }))
}

impl LoggingGuard {
    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
