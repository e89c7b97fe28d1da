//! Global logging for the Tali toolchain
//!
//! A process-wide [`LoggingService`] behind a `OnceLock`, addressed through
//! the `log_*!` macros. Events carry stable diagnostic codes whose behavior
//! is described by the registry in [`codes`].

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, EventSummary, Logger, LoggingService, MemoryLogger, NullLogger,
    StructuredLogger,
};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Validate configuration and install the global logging service
///
/// The code registry is cross-checked before the service is installed, so a
/// missing metadata row fails initialization instead of surfacing later as
/// an "Unknown error" diagnostic.
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Logging configuration invalid: {}", e))?;
    codes::verify_registry()?;

    let service = Arc::new(LoggingService::with_config());
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Logging already initialized")?;

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Logging service ready",
    ));

    Ok(())
}

/// Install a custom service, primarily for tests
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Logging already initialized")?;

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Get the global logger, panicking when it was never installed
pub fn get_global_logger() -> &'static LoggingService {
    GLOBAL_LOGGER
        .get()
        .expect("logging not initialized; call init_global_logging() first")
        .as_ref()
}

/// Get the global logger if one was installed
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(Arc::as_ref)
}

/// Route an event to the global logger
///
/// Error events raised before initialization still reach stderr; everything
/// else is dropped until a logger exists.
pub fn dispatch(event: LogEvent) {
    match try_get_global_logger() {
        Some(logger) => logger.log_event(event),
        None if event.is_error() => eprintln!("{}", event.format()),
        None => {}
    }
}

/// Build an error event with its registry classification attached as context
pub fn classified_error_event(code: Code, message: &str) -> LogEvent {
    let code_str = code.as_str();
    LogEvent::error(code, message)
        .with_context("severity", codes::get_severity(code_str).as_str())
        .with_context("requires_halt", &codes::requires_halt(code_str).to_string())
        .with_context("recoverable", &codes::is_recoverable(code_str).to_string())
}

/// Render the logging system state for `--diagnostics`
pub fn get_system_diagnostics() -> String {
    use std::fmt::Write as _;

    let mut out = String::from("=== Tali Logging Diagnostics ===\n");
    let _ = writeln!(out, "Logger installed: {}", is_initialized());
    let _ = writeln!(
        out,
        "Mode: {}",
        if config::is_development_mode() {
            "development"
        } else {
            "production"
        }
    );

    out.push('\n');
    out.push_str(&config::get_config_summary());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_logger_installs_once() {
        if !is_initialized() {
            assert!(init_global_logging().is_ok());
            assert!(is_initialized());
            get_global_logger().log_event(LogEvent::info("Logger reachable after init"));
        }

        // The slot is single-assignment
        let replacement = Arc::new(LoggingService::new(
            Arc::new(MemoryLogger::new()),
            LogLevel::Debug,
        ));
        assert!(init_global_logging_with_service(replacement).is_err());
    }

    #[test]
    fn test_dispatch_without_logger_does_not_panic() {
        dispatch(LogEvent::error(
            codes::lexical::ILLEGAL_CHARACTER,
            "Unrecognized character",
        ));
        dispatch(LogEvent::success(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
        ));
        dispatch(LogEvent::debug("State snapshot"));
    }

    #[test]
    fn test_classified_event_carries_registry_fields() {
        let event = classified_error_event(codes::system::INTERNAL_ERROR, "Internal failure");

        assert_eq!(event.context.get("severity"), Some(&"Critical".to_string()));
        assert_eq!(
            event.context.get("requires_halt"),
            Some(&"true".to_string())
        );
        assert_eq!(event.context.get("recoverable"), Some(&"false".to_string()));
    }

    #[test]
    fn test_diagnostics_rendering() {
        let diagnostics = get_system_diagnostics();
        assert!(diagnostics.contains("Tali Logging Diagnostics"));
        assert!(diagnostics.contains("Logger installed:"));
        assert!(diagnostics.contains("Min log level"));
    }
}
