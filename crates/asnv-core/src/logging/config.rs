use crate::logging::formatter::LogFormat;
use std::path::PathBuf;

/// Environment variable naming an optional log file
pub const LOG_FILE_ENV: &str = "ASNV_LOG_FILE";

/// Configuration for the logging subsystem
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level or filter directive (error, warn, info, debug, trace)
    pub level: String,
    /// Path to log file (None = no file logging)
    pub file: Option<PathBuf>,
    /// Also log to stderr
    pub console: bool,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            file: std::env::var(LOG_FILE_ENV).ok().map(PathBuf::from),
            console: true,
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    pub fn new(level: String, file: Option<PathBuf>, console: bool, format: LogFormat) -> Self {
        Self {
            level,
            file,
            console,
            format,
        }
    }
}
