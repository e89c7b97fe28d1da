//! Logger implementations and the level-filtering service

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex};

/// Destination for log events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Pairs a logger with the minimum level worth sending to it
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Build the service the runtime preferences ask for. Console output is
    /// the master switch; structured logging picks the format when it is on.
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        if !config::use_console_logging() {
            Self::new(Arc::new(NullLogger), min_level)
        } else if config::use_structured_logging() {
            Self::new(Arc::new(StructuredLogger::new(min_level)), min_level)
        } else {
            Self::new(Arc::new(ConsoleLogger::new(min_level)), min_level)
        }
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Human-readable output: errors to stderr, everything else to stdout
pub struct ConsoleLogger {
    min_level: LogLevel,
    detailed_errors: bool,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            detailed_errors: config::use_detailed_error_reporting(),
        }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level > self.min_level {
            return;
        }

        if event.is_error() {
            if self.detailed_errors {
                eprintln!("{}", event.format_detailed());
            } else {
                eprintln!("{}", event.format());
            }
        } else {
            println!("{}", event.format());
        }
    }
}

/// One JSON object per line, for log shippers and tooling
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level > self.min_level {
            return;
        }

        // Serialization failure falls back to the plain rendering
        let line = event.format_json().unwrap_or_else(|_| event.format());
        if event.is_error() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Discards every event, for sessions with console output turned off
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// Captures events in memory, for assertions in tests
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    fn filtered(&self, keep: impl Fn(&LogEvent) -> bool) -> Vec<LogEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| keep(event))
            .cloned()
            .collect()
    }

    pub fn error_events(&self) -> Vec<LogEvent> {
        self.filtered(LogEvent::is_error)
    }

    pub fn warning_events(&self) -> Vec<LogEvent> {
        self.filtered(LogEvent::is_warning)
    }

    pub fn events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.filtered(|event| event.code == code)
    }

    fn any_event(&self, pred: impl Fn(&LogEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(|event| pred(event))
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.any_event(|event| event.is_error() && event.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.any_event(|event| event.is_info() && event.code == code)
    }

    /// Per-level counts over the captured events
    pub fn summary(&self) -> EventSummary {
        let events = self.events.lock().unwrap();
        let mut summary = EventSummary {
            total: events.len(),
            ..EventSummary::default()
        };
        for event in events.iter() {
            match event.level {
                LogLevel::Error => summary.errors += 1,
                LogLevel::Warning => summary.warnings += 1,
                LogLevel::Info => summary.infos += 1,
                LogLevel::Debug => summary.debugs += 1,
            }
        }
        summary
    }
}

/// Counts of captured events, broken down by level
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub debugs: usize,
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.events.lock().unwrap();

        // Bounded by the compile-time buffer size, oldest dropped first
        if events.len() >= config::get_log_buffer_size() {
            events.remove(0);
        }
        events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_console_logger_smoke() {
        let logger = ConsoleLogger::new(LogLevel::Debug);
        logger.log(&LogEvent::info("Session started"));
        logger.log(&LogEvent::error(
            codes::lexical::ILLEGAL_CHARACTER,
            "Unrecognized character",
        ));
    }

    #[test]
    fn test_structured_logger_smoke() {
        let logger = StructuredLogger::new(LogLevel::Info);
        logger.log(
            &LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Source file missing")
                .with_context("file", "missing.tali"),
        );
    }

    #[test]
    fn test_null_logger_accepts_events_silently() {
        let service = LoggingService::new(Arc::new(NullLogger), LogLevel::Debug);

        // The level filter still applies; the sink just writes nowhere
        assert!(service.should_log(LogLevel::Error));
        service.log_event(LogEvent::error(
            codes::lexical::ILLEGAL_CHARACTER,
            "Unrecognized character",
        ));
        service.log_event(LogEvent::debug("Scanner state"));
    }

    #[test]
    fn test_memory_logger_captures_and_queries() {
        let logger = MemoryLogger::default();

        logger.log(&LogEvent::success(
            codes::success::REPL_SESSION_COMPLETED,
            "Session finished",
        ));
        logger.log(&LogEvent::error(
            codes::lexical::ILLEGAL_CHARACTER,
            "Unrecognized character",
        ));
        logger.log(&LogEvent::warning("Short identifier"));

        assert_eq!(logger.event_count(), 3);
        assert_eq!(logger.error_events().len(), 1);
        assert_eq!(logger.warning_events().len(), 1);
        assert_eq!(
            logger
                .events_with_code(codes::lexical::ILLEGAL_CHARACTER)
                .len(),
            1
        );
        assert!(logger.has_error_with_code(codes::lexical::ILLEGAL_CHARACTER));
        assert!(logger.has_success_with_code(codes::success::REPL_SESSION_COMPLETED));

        logger.clear();
        assert_eq!(logger.event_count(), 0);
    }

    #[test]
    fn test_memory_logger_summary_counts_levels() {
        let logger = MemoryLogger::default();
        logger.log(&LogEvent::error(
            codes::file_processing::FILE_NOT_FOUND,
            "Source file missing",
        ));
        logger.log(&LogEvent::warning("Unusual extension"));
        logger.log(&LogEvent::info("Session starting"));
        logger.log(&LogEvent::info("Session finished"));

        let summary = logger.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.infos, 2);
        assert_eq!(summary.debugs, 0);
    }

    #[test]
    fn test_memory_logger_is_bounded() {
        let logger = MemoryLogger::new();
        let capacity = config::get_log_buffer_size();

        for i in 0..capacity + 5 {
            logger.log(&LogEvent::info(&format!("event {}", i)));
        }

        assert_eq!(logger.event_count(), capacity);
        // The oldest events were evicted
        assert_eq!(logger.events()[0].message, "event 5");
    }

    #[test]
    fn test_service_filters_by_level() {
        let logger = Arc::new(MemoryLogger::default());
        let service = LoggingService::new(logger.clone(), LogLevel::Error);

        service.log_event(LogEvent::debug("Dropped"));
        service.log_event(LogEvent::info("Dropped"));
        service.log_event(LogEvent::error(codes::repl::INPUT_READ_FAILED, "Kept"));

        assert_eq!(logger.event_count(), 1);
        assert!(logger.has_error_with_code(codes::repl::INPUT_READ_FAILED));
    }

    #[test]
    fn test_service_with_config_accepts_errors() {
        let service = LoggingService::with_config();
        assert!(service.should_log(LogLevel::Error));
    }
}
