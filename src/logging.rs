//! Diagnostic log levels and fetch-error classification.
//!
//! Errors are never surfaced in the dashboard UI; they are classified here
//! and written through the `log` facade only.

use crate::backend::error::BackendError;
use log::LevelFilter;
use std::env;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

/// Classify a failed telemetry or analysis fetch for diagnostic logging.
///
/// Every failure kind follows the same swallow-and-retry-next-tick policy;
/// the level only controls how loudly the diagnostic log records it.
pub fn classify_fetch_error(error: &BackendError) -> LogLevel {
    match error {
        // Temporary server issues; the next tick will try again
        BackendError::Http { status, .. } if *status == 429 => LogLevel::Debug,
        BackendError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

        // Auth problems won't heal on their own
        BackendError::Http { status, .. } if *status == 401 || *status == 403 => LogLevel::Error,

        // A body that fails validation is treated like any transport failure
        BackendError::Decode(_) => LogLevel::Warn,

        // Network issues - usually temporary
        _ => LogLevel::Warn,
    }
}

pub fn get_rust_log_level() -> LogLevel {
    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    parse_rust_log_level(&rust_log)
}

pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    // Handle common RUST_LOG formats
    let level_str = rust_log
        .split(',')
        .next()
        .unwrap_or(rust_log)
        .split('=')
        .next_back()
        .unwrap_or(rust_log)
        .to_lowercase();

    match level_str.as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info, // Default to info if parsing fails
    }
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    let threshold = get_rust_log_level();
    should_log(event_level, threshold)
}

/// Write one classified diagnostic line through the `log` facade.
pub fn log_fetch_failure(context: &str, error: &BackendError) {
    let level = classify_fetch_error(error);
    if !should_log_with_env(level) {
        return;
    }
    match level {
        LogLevel::Trace => log::trace!("{context}: {error}"),
        LogLevel::Debug => log::debug!("{context}: {error}"),
        LogLevel::Info => log::info!("{context}: {error}"),
        LogLevel::Warn => log::warn!("{context}: {error}"),
        LogLevel::Error => log::error!("{context}: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rust_log_level() {
        assert_eq!(parse_rust_log_level("debug"), LogLevel::Debug);
        assert_eq!(parse_rust_log_level("info"), LogLevel::Info);
        assert_eq!(parse_rust_log_level("warn"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("error"), LogLevel::Error);
        assert_eq!(parse_rust_log_level("trace"), LogLevel::Trace);

        // Test with module-specific formats
        assert_eq!(
            parse_rust_log_level("trustlock_console=debug"),
            LogLevel::Debug
        );
        assert_eq!(
            parse_rust_log_level("trustlock_console=debug,hyper=info"),
            LogLevel::Debug
        );

        // Test default
        assert_eq!(parse_rust_log_level("invalid"), LogLevel::Info);
    }

    #[test]
    fn test_should_log() {
        assert!(should_log(LogLevel::Error, LogLevel::Debug));
        assert!(should_log(LogLevel::Warn, LogLevel::Warn));
        assert!(!should_log(LogLevel::Debug, LogLevel::Error));
        assert!(!should_log(LogLevel::Info, LogLevel::Error));
    }

    #[test]
    fn test_classify_fetch_error_levels() {
        let rate_limited = BackendError::Http {
            status: 429,
            message: "slow down".to_string(),
        };
        assert_eq!(classify_fetch_error(&rate_limited), LogLevel::Debug);

        let unavailable = BackendError::Http {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(classify_fetch_error(&unavailable), LogLevel::Warn);

        let forbidden = BackendError::Http {
            status: 403,
            message: "nope".to_string(),
        };
        assert_eq!(classify_fetch_error(&forbidden), LogLevel::Error);

        let malformed: BackendError =
            serde_json::from_str::<serde_json::Value>("{not json")
                .map_err(BackendError::Decode)
                .unwrap_err();
        assert_eq!(classify_fetch_error(&malformed), LogLevel::Warn);
    }
}
