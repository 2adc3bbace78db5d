//! Process-wide log output for applications using this crate.
//!
//! Nothing is installed implicitly. Call [`configure_logging`] once from the
//! application entry point; later calls only change the level. Log events
//! never carry merchant credentials or full phone numbers.

use crate::error::{Result, ShwaryError};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Registry, fmt, reload};

static LEVEL: OnceLock<reload::Handle<LevelFilter, Registry>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    /// Daily-rotated log file, in addition to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            log_file: Some(PathBuf::from("logs/shwary.log")),
        }
    }
}

impl LoggingConfig {
    pub fn console_only(level: LevelFilter) -> Self {
        Self {
            level,
            log_file: None,
        }
    }
}

/// Installs the global subscriber on first call, adjusts its level after.
///
/// Fails if another global subscriber was installed by someone else, or if
/// the log file directory cannot be created.
pub fn configure_logging(config: &LoggingConfig) -> Result<()> {
    if let Some(handle) = LEVEL.get() {
        return handle
            .modify(|level| *level = config.level)
            .map_err(|e| ShwaryError::Configuration(format!("could not change log level: {e}")));
    }

    let (filter, handle) = reload::Layer::new(config.level);
    let file_layer = match &config.log_file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(rolling_appender(path)?),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| ShwaryError::Configuration(format!("could not install logger: {e}")))?;

    // A concurrent first call loses the race in try_init above.
    let _ = LEVEL.set(handle);
    tracing::debug!(level = %config.level, "logging configured");
    Ok(())
}

/// Level currently applied, if logging was configured.
pub fn current_level() -> Option<LevelFilter> {
    LEVEL.get().and_then(|handle| handle.clone_current())
}

fn rolling_appender(path: &Path) -> Result<RollingFileAppender> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ShwaryError::Configuration(format!("invalid log file path {path:?}")))?;

    std::fs::create_dir_all(directory)?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|e| ShwaryError::Configuration(format!("could not open log file: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_installs_then_only_level_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: LevelFilter::INFO,
            log_file: Some(dir.path().join("nested/shwary.log")),
        };

        configure_logging(&config).unwrap();
        assert_eq!(current_level(), Some(LevelFilter::INFO));
        assert!(dir.path().join("nested").is_dir());

        configure_logging(&LoggingConfig::console_only(LevelFilter::DEBUG)).unwrap();
        assert_eq!(current_level(), Some(LevelFilter::DEBUG));
    }
}
