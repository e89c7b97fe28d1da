//! Configuration access for logging - compile-time constants plus runtime preferences
//!
//! Buffer and message limits are baked in at compile time from the TOML
//! profile; user preferences arrive through TALI_* environment variables
//! and are frozen at initialization.

use crate::config::compile_time::logging::*;
use crate::config::runtime::{LogLevel as PreferenceLevel, LoggingPreferences};
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Freeze the user's logging preferences for the rest of the process
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    validate_preferences(&preferences)?;

    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime logging preferences were already set")?;

    Ok(())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

fn validate_preferences(preferences: &LoggingPreferences) -> Result<(), String> {
    // Structured output is single-line JSON; the multi-line detailed error
    // format only applies to console output
    if preferences.use_structured_logging && preferences.detailed_error_reporting {
        return Err(
            "Detailed error reporting requires console logging, not structured output".to_string(),
        );
    }

    Ok(())
}

/// Minimum level worth emitting (user preference)
pub fn get_min_log_level() -> LogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

/// Whether to emit JSON lines instead of human-readable text (user preference)
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Whether events are written to the console at all (user preference)
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Whether errors render with their full registry metadata (user preference)
pub fn use_detailed_error_reporting() -> bool {
    get_runtime_preferences().detailed_error_reporting
}

/// In-memory event capacity (compile-time constant)
pub fn get_log_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Longest message stored on an event (compile-time constant)
pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Check the compiled limits and any frozen preferences for sanity
pub fn validate_config() -> Result<(), String> {
    if !(16..=100_000).contains(&LOG_BUFFER_SIZE) {
        return Err(format!(
            "Log buffer size out of range: {} (expected 16..=100000)",
            LOG_BUFFER_SIZE
        ));
    }

    if MAX_LOG_MESSAGE_LENGTH < 80 {
        return Err(format!(
            "Max log message length too small: {} (expected at least 80)",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    if let Some(preferences) = RUNTIME_PREFERENCES.get() {
        validate_preferences(preferences)?;
    }

    Ok(())
}

/// Render the effective logging configuration for diagnostics
pub fn get_config_summary() -> String {
    use std::fmt::Write as _;

    let preferences = get_runtime_preferences();

    let mut out = String::from("Logging Configuration:\n");
    let _ = writeln!(out, "=== Limits (Compile-time) ===");
    let _ = writeln!(out, "- Log buffer size: {}", LOG_BUFFER_SIZE);
    let _ = writeln!(out, "- Max message length: {}", MAX_LOG_MESSAGE_LENGTH);
    let _ = writeln!(out, "=== User Preferences (Runtime) ===");
    let _ = writeln!(
        out,
        "- Min log level: {}",
        preferences.min_log_level.as_str()
    );
    let _ = writeln!(
        out,
        "- Structured logging: {}",
        preferences.use_structured_logging
    );
    let _ = writeln!(
        out,
        "- Console logging: {}",
        preferences.enable_console_logging
    );
    let _ = write!(
        out,
        "- Detailed error reporting: {}",
        preferences.detailed_error_reporting
    );
    out
}

pub fn is_development_mode() -> bool {
    cfg!(debug_assertions)
}

pub fn is_production_mode() -> bool {
    !cfg!(debug_assertions)
}

/// Preferences suited to working on the tokenizer itself
pub fn get_development_preferences() -> LoggingPreferences {
    LoggingPreferences {
        min_log_level: PreferenceLevel::Debug,
        use_structured_logging: false,
        enable_console_logging: true,
        detailed_error_reporting: true,
    }
}

/// Preferences suited to running behind a log shipper
pub fn get_production_preferences() -> LoggingPreferences {
    LoggingPreferences {
        min_log_level: PreferenceLevel::Info,
        use_structured_logging: true,
        enable_console_logging: true,
        detailed_error_reporting: false,
    }
}
