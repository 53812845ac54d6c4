//! Engine log sink
//!
//! Every component reports through one process-wide `Logger`. The default
//! sink prints colored, timestamped lines to stdout; tests and host
//! applications swap it with `set_logger`. ERROR entries carry the
//! file:line of the call site.

use colored::*;
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use chrono::{DateTime, Local};

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Destination for engine log entries
///
/// ```no_run
/// use framebuffer_engine::fbengine::log::{Logger, LogEntry, set_logger};
///
/// struct Silent;
///
/// impl Logger for Silent {
///     fn log(&self, _entry: &LogEntry) {}
/// }
///
/// set_logger(Silent);
/// ```
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Emitting component, `fbengine::<Component>`
    pub source: String,
    pub message: String,
    /// Call site, ERROR entries only
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-bind and per-attachment detail
    Trace,
    /// Object creation and release
    Debug,
    /// Context lifecycle
    Info,
    Warn,
    /// Failed operations
    Error,
}

impl LogSeverity {
    fn colored_label(self) -> ColoredString {
        match self {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        }
    }
}

/// Stdout sink: `[time] [SEVERITY] [source] message (file:line)`
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let time: DateTime<Local> = entry.timestamp.into();
        let location = match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(" ({}:{})", file, line),
            _ => String::new(),
        };

        println!(
            "[{}] [{}] [{}] {}{}",
            time.format("%Y-%m-%d %H:%M:%S%.3f"),
            entry.severity.colored_label(),
            entry.source.bright_blue(),
            entry.message,
            location,
        );
    }
}

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

/// Route all engine logs to `logger`
pub fn set_logger<L: Logger + 'static>(logger: L) {
    if let Ok(mut slot) = logger_slot().write() {
        *slot = Box::new(logger);
    }
}

/// Go back to `DefaultLogger`
pub fn reset_logger() {
    if let Ok(mut slot) = logger_slot().write() {
        *slot = Box::new(DefaultLogger);
    }
}

fn emit(severity: LogSeverity, source: &str, message: String, site: Option<(&'static str, u32)>) {
    if let Ok(slot) = logger_slot().read() {
        slot.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: site.map(|(file, _)| file),
            line: site.map(|(_, line)| line),
        });
    }
}

/// Backs `engine_trace!` through `engine_warn!`
pub fn log(severity: LogSeverity, source: &str, message: String) {
    emit(severity, source, message, None);
}

/// Backs `engine_error!`
pub fn log_detailed(
    severity: LogSeverity,
    source: &str,
    message: String,
    file: &'static str,
    line: u32,
) {
    emit(severity, source, message, Some((file, line)));
}

#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Trace, $source, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Debug, $source, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Info, $source, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log($crate::log::LogSeverity::Warn, $source, format!($($arg)*))
    };
}

/// Logs at ERROR with the caller's file and line
///
/// ```ignore
/// engine_error!("fbengine::TargetManager", "bind failed: {}", error);
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!(),
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
