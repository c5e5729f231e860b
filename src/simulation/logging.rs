//! Logging and tracing configuration
//!
//! Diagnostics go to stderr so that stdout stays free for dashboards and
//! JSON reports. Optional daily rolling files are written through
//! `tracing-appender`.

use std::io;
use tracing::{info, Level};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Keeps the background log writers running
///
/// Hold it until the program exits; dropping it flushes lines still buffered
/// for the log file.
#[must_use = "dropping the guard stops the background log writers"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    workers: Vec<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether log lines are handed to background writers
    pub fn has_background_writers(&self) -> bool {
        !self.workers.is_empty()
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Whether to enable JSON formatting
    pub json_format: bool,
    /// Whether to log to file
    pub log_to_file: bool,
    /// Log file directory (if logging to file)
    pub log_directory: Option<String>,
    /// Log file prefix (if logging to file)
    pub log_file_prefix: String,
    /// Whether to enable span events
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
    /// Custom environment filter
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            json_format: false,
            log_to_file: false,
            log_directory: None,
            log_file_prefix: "smart-door-lock".to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_to_file = true;
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Initialize the global tracing subscriber
    pub fn init(self) -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
        info!("Initializing logging with configuration: {:?}", self);

        // Create environment filter
        let env_filter = if let Some(filter) = &self.env_filter {
            EnvFilter::try_new(filter)?
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!(
                    "{}={}",
                    env!("CARGO_PKG_NAME").replace('-', "_"),
                    self.level
                ))
            })
        };

        let registry = Registry::default().with(env_filter);
        let mut guard = LoggingGuard::default();

        if self.log_to_file {
            // Set up file logging
            let log_dir = self.log_directory.as_deref().unwrap_or("logs");
            let file_appender = rolling::daily(log_dir, &self.log_file_prefix);
            let (file_writer, file_guard) = non_blocking(file_appender);

            // Set up console logging
            let (console_writer, console_guard) = non_blocking(io::stderr());
            guard.workers.push(file_guard);
            guard.workers.push(console_guard);

            if self.json_format {
                // JSON format for both file and console
                let file_layer = fmt::layer().json().with_writer(file_writer).with_span_events(
                    if self.enable_span_events { FmtSpan::FULL } else { FmtSpan::NONE },
                );

                let console_layer =
                    fmt::layer().json().with_writer(console_writer).with_span_events(
                        if self.enable_span_events { FmtSpan::FULL } else { FmtSpan::NONE },
                    );

                registry.with(file_layer).with(console_layer).init();
            } else {
                // Pretty format for console, JSON for file
                let file_layer = fmt::layer().json().with_writer(file_writer).with_span_events(
                    if self.enable_span_events { FmtSpan::FULL } else { FmtSpan::NONE },
                );

                let console_layer = fmt::layer()
                    .pretty()
                    .with_writer(console_writer)
                    .with_ansi(self.enable_ansi)
                    .with_span_events(if self.enable_span_events {
                        FmtSpan::FULL
                    } else {
                        FmtSpan::NONE
                    });

                registry.with(file_layer).with(console_layer).init();
            }
        } else {
            // Console logging only
            if self.json_format {
                let layer = fmt::layer().json().with_writer(io::stderr).with_span_events(
                    if self.enable_span_events { FmtSpan::FULL } else { FmtSpan::NONE },
                );

                registry.with(layer).init();
            } else {
                let layer = fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_ansi(self.enable_ansi)
                    .with_span_events(if self.enable_span_events {
                        FmtSpan::FULL
                    } else {
                        FmtSpan::NONE
                    });

                registry.with(layer).init();
            }
        }

        info!("Logging initialized successfully");
        Ok(guard)
    }

    /// Pick the level from the `--verbose` / `--debug` flags
    ///
    /// `--debug` wins over `--verbose`; with neither only warnings are shown.
    pub fn for_flags(verbose: bool, debug: bool) -> Self {
        let level = if debug {
            Level::DEBUG
        } else if verbose {
            Level::INFO
        } else {
            Level::WARN
        };
        let config = Self::new().with_level(level);
        if debug {
            config.with_span_events()
        } else {
            config
        }
    }
}

/// Structured log event tagged with the door lock component
#[macro_export]
macro_rules! lock_event {
    ($level:ident, $message:expr $(, $($field:tt)+)?) => {
        tracing::$level!(component = "door_lock", $($($field)+,)? $message)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_logging_config_creation() {
        let config = LoggingConfig::new();
        assert_eq!(config.level, Level::WARN);
        assert!(!config.json_format);
        assert!(!config.log_to_file);
        assert!(config.log_directory.is_none());
        assert_eq!(config.log_file_prefix, "smart-door-lock");
        assert!(!config.enable_span_events);
        assert!(config.enable_ansi);
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn test_logging_config_builder_pattern() {
        let config = LoggingConfig::new()
            .with_level(Level::DEBUG)
            .with_json_format()
            .with_file_logging("test_logs")
            .with_file_prefix("test_prefix")
            .with_span_events()
            .without_ansi()
            .with_env_filter("debug");

        assert_eq!(config.level, Level::DEBUG);
        assert!(config.json_format);
        assert!(config.log_to_file);
        assert_eq!(config.log_directory, Some("test_logs".to_string()));
        assert_eq!(config.log_file_prefix, "test_prefix");
        assert!(config.enable_span_events);
        assert!(!config.enable_ansi);
        assert_eq!(config.env_filter, Some("debug".to_string()));
    }

    #[test]
    fn test_default_logging_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert!(!config.json_format);
        assert!(!config.log_to_file);
    }

    #[test]
    fn test_level_from_flags() {
        assert_eq!(LoggingConfig::for_flags(false, false).level, Level::WARN);
        assert_eq!(LoggingConfig::for_flags(true, false).level, Level::INFO);
        assert_eq!(LoggingConfig::for_flags(true, true).level, Level::DEBUG);
        assert!(LoggingConfig::for_flags(false, true).enable_span_events);
        assert!(!LoggingConfig::for_flags(true, false).enable_span_events);
    }

    // Installs the global subscriber; no other test in this binary may call init
    #[test]
    fn test_file_logging_flushes_when_guard_drops() {
        let dir = tempfile::tempdir().unwrap();
        let guard = LoggingConfig::new()
            .with_file_logging(dir.path().to_string_lossy().into_owned())
            .with_env_filter("smart_door_lock_simulator=info")
            .without_ansi()
            .init()
            .unwrap();
        assert!(guard.has_background_writers());

        info!(door = "front", "Relock timer armed");
        drop(guard);

        let contents: String = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(contents.contains("Relock timer armed"));
    }
}
