// src/utils/logger.rs

use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

use crate::console_log;

/// Variable holding the minimum level, e.g. `debug`.
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Severity of a log line. Lower is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Info = 1,
    Debug = 2,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Unknown names fall back to `Info`. Nothing is logged at warning
    /// severity, so `warn` keeps only errors.
    pub fn from_string(s: &str) -> LogLevel {
        match s.trim().to_lowercase().as_str() {
            "error" | "warn" | "warning" => LogLevel::Error,
            "debug" | "trace" => LogLevel::Debug,
            _ => LogLevel::Info,
        }
    }
}

/// JSON-line logger writing to the worker console.
///
/// Request handling works on a copy carrying request fields (method, student)
/// so every line for that request can be correlated.
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    request: Map<String, Value>,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            request: Map::new(),
        }
    }

    /// Builds a logger from the deployment's variables.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup(LOG_LEVEL_VAR)
            .map(|raw| LogLevel::from_string(&raw))
            .unwrap_or(LogLevel::Info);
        Self::new(level)
    }

    /// Returns a copy that stamps `key` on every line it writes.
    pub fn with_context(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut scoped = self.clone();
        scoped.request.insert(key.to_string(), value.into());
        scoped
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    fn render(&self, level: LogLevel, message: &str, meta: Option<&Value>) -> String {
        let mut line = json!({
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            "level": level.as_str(),
            "message": message,
        });
        if !self.request.is_empty() {
            line["request"] = Value::Object(self.request.clone());
        }
        if let Some(meta) = meta {
            line["meta"] = meta.clone();
        }
        line.to_string()
    }

    pub fn log(&self, level: LogLevel, message: &str, meta: Option<&Value>) {
        if self.enabled(level) {
            console_log!("{}", self.render(level, message, meta));
        }
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger. The first call wins; an isolate keeps
/// the level it was started with.
pub fn init_logger(logger: Logger) {
    GLOBAL_LOGGER.set(logger).ok();
}

/// Process-wide logger, `Info` until `init_logger` runs.
pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| Logger::new(LogLevel::Info))
}

/// `log_error!(msg, meta)` writes through the global logger;
/// `log_error!(scoped => msg, meta)` writes through `scoped`.
#[macro_export]
macro_rules! log_error {
    ($log:expr => $msg:expr, $meta:expr) => {
        $log.log($crate::utils::logger::LogLevel::Error, $msg, Some(&$meta))
    };
    ($msg:expr, $meta:expr) => {
        $crate::utils::logger::logger().log($crate::utils::logger::LogLevel::Error, $msg, Some(&$meta))
    };
}

#[macro_export]
macro_rules! log_info {
    ($log:expr => $msg:expr, $meta:expr) => {
        $log.log($crate::utils::logger::LogLevel::Info, $msg, Some(&$meta))
    };
    ($msg:expr, $meta:expr) => {
        $crate::utils::logger::logger().log($crate::utils::logger::LogLevel::Info, $msg, Some(&$meta))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($msg:expr, $meta:expr) => {
        $crate::utils::logger::logger().log($crate::utils::logger::LogLevel::Debug, $msg, Some(&$meta))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_string() {
        assert_eq!(LogLevel::from_string("error"), LogLevel::Error);
        assert_eq!(LogLevel::from_string("WARN"), LogLevel::Error);
        assert_eq!(LogLevel::from_string(" debug "), LogLevel::Debug);
        assert_eq!(LogLevel::from_string("info"), LogLevel::Info);
        assert_eq!(LogLevel::from_string("verbose"), LogLevel::Info);
    }

    #[test]
    fn test_level_read_from_lookup() {
        let debug = Logger::from_lookup(|key| (key == LOG_LEVEL_VAR).then(|| "debug".to_string()));
        assert!(debug.enabled(LogLevel::Debug));

        let quiet = Logger::from_lookup(|_| Some("error".to_string()));
        assert!(quiet.enabled(LogLevel::Error));
        assert!(!quiet.enabled(LogLevel::Info));

        let unset = Logger::from_lookup(|_| None);
        assert!(unset.enabled(LogLevel::Info));
        assert!(!unset.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_request_context_is_scoped_to_the_copy() {
        let base = Logger::new(LogLevel::Debug);
        let scoped = base
            .with_context("method", "POST")
            .with_context("student_name", "Ana Lima");

        let line: Value = serde_json::from_str(&scoped.render(
            LogLevel::Info,
            "sent",
            Some(&json!({"violations": 3})),
        ))
        .expect("log line is JSON");
        assert_eq!(line["level"], "INFO");
        assert_eq!(line["message"], "sent");
        assert_eq!(line["request"]["method"], "POST");
        assert_eq!(line["request"]["student_name"], "Ana Lima");
        assert_eq!(line["meta"]["violations"], 3);

        let plain: Value =
            serde_json::from_str(&base.render(LogLevel::Error, "boom", None)).expect("log line is JSON");
        assert!(plain.get("request").is_none());
        assert!(plain.get("meta").is_none());
    }
}
