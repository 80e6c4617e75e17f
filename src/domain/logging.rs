//! Logging facade. Chart code logs through the `log_*` macros; the host
//! installs a sink and a clock once at startup. Until then entries are
//! dropped.

use derive_more::Display;
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace,
    #[display(fmt = "DEBUG")]
    Debug,
    #[display(fmt = "INFO")]
    Info,
    #[display(fmt = "WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer and unit an entry comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, component: LogComponent, message: impl Into<String>) -> Self {
        Self {
            timestamp: get_time_provider().current_timestamp(),
            level,
            component,
            message: message.into(),
        }
    }

    pub fn format_line(&self) -> String {
        format!(
            "{} {} [{}] {}",
            get_time_provider().format_timestamp(self.timestamp),
            self.level,
            self.component,
            self.message
        )
    }
}

pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

/// Log sink
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    /// Checked before the message is formatted
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }
}

static LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static TIME_PROVIDER: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// Install the process-wide sink. Returns `false` if one was already installed.
pub fn init_logger(logger: Box<dyn Logger>) -> bool {
    LOGGER.set(logger).is_ok()
}

/// Install the process-wide clock. Returns `false` if one was already installed.
pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) -> bool {
    TIME_PROVIDER.set(time_provider).is_ok()
}

pub fn get_logger() -> &'static dyn Logger {
    LOGGER.get().map(|logger| logger.as_ref()).unwrap_or(&DiscardLogger)
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    TIME_PROVIDER
        .get()
        .map(|provider| provider.as_ref())
        .unwrap_or(&SequenceClock)
}

struct DiscardLogger;

impl Logger for DiscardLogger {
    fn log(&self, _entry: LogEntry) {}

    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// Stand-in clock outside the browser: a process-wide sequence number
struct SequenceClock;

impl TimeProvider for SequenceClock {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static NEXT: AtomicU64 = AtomicU64::new(0);
        NEXT.fetch_add(1, Ordering::Relaxed)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("#{:06}", timestamp)
    }
}

/// Keeps entries in memory. Clones share one buffer, so a clone can be
/// installed globally while the original is inspected.
#[derive(Debug, Clone)]
pub struct MemoryLogger {
    min_level: LogLevel,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new(LogLevel::Trace)
    }
}

impl MemoryLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level, entries: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map(|entries| entries.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Logger for MemoryLogger {
    fn log(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// Log at an explicit level through the installed sink
#[macro_export]
macro_rules! log_at {
    ($level:expr, $component:expr, $($arg:tt)*) => {{
        let logger = $crate::domain::logging::get_logger();
        let level = $level;
        if $crate::domain::logging::Logger::enabled(logger, level) {
            $crate::domain::logging::Logger::log(
                logger,
                $crate::domain::logging::LogEntry::new(level, $component, format!($($arg)*)),
            );
        }
    }};
}

/// Compiled out of release builds
#[macro_export]
macro_rules! log_trace {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        $crate::log_at!($crate::domain::logging::LogLevel::Trace, $component, $($arg)*);
    };
}

/// Compiled out of release builds
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        $crate::log_at!($crate::domain::logging::LogLevel::Debug, $component, $($arg)*);
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Info, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Warn, $component, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::domain::logging::LogLevel::Error, $component, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_labels() {
        assert_eq!(LogLevel::Warn.to_string(), "WARN");
        assert_eq!(LogComponent::Domain("Viewport").to_string(), "DOM:Viewport");
        assert_eq!(LogComponent::Infrastructure("Canvas").to_string(), "INF:Canvas");
    }

    #[test]
    fn format_line_layout() {
        let entry = LogEntry::new(LogLevel::Info, LogComponent::Presentation("Chart"), "point added");
        assert!(entry.format_line().ends_with("INFO [PRE:Chart] point added"), "{}", entry.format_line());
    }

    #[test]
    fn memory_logger_filters_and_shares_buffer() {
        let logger = MemoryLogger::new(LogLevel::Info);
        let installed = logger.clone();
        assert!(!installed.enabled(LogLevel::Debug));
        assert!(installed.enabled(LogLevel::Warn));

        installed.log(LogEntry::new(LogLevel::Warn, LogComponent::Domain("Test"), "seen"));
        assert_eq!(logger.entries().len(), 1);
        logger.clear();
        assert!(installed.entries().is_empty());
    }
}
