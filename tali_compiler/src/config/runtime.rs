//! Runtime preferences - user experience settings resolved at startup
//!
//! Every preference here changes presentation or convenience, never language
//! semantics. Values come from TALI_* environment variables, optionally
//! overridden by a TOML preferences file named in TALI_CONFIG_FILE.

use crate::logging::events::LogLevel as EventLevel;
use serde::{Deserialize, Serialize};
use std::env;

/// Every TALI_* variable the loader consults, in one place.
pub mod env_vars {
    // File Processor
    pub const REQUIRE_EXTENSION: &str = "TALI_REQUIRE_EXTENSION";
    pub const PERFORMANCE_LOGGING: &str = "TALI_PERFORMANCE_LOGGING";
    pub const SHOW_SOURCE_SNIPPETS: &str = "TALI_SHOW_SOURCE_SNIPPETS";

    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "TALI_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "TALI_LEXICAL_INCLUDE_POSITIONS";
    pub const LEXICAL_LOG_TOKEN_STREAM: &str = "TALI_LEXICAL_LOG_TOKEN_STREAM";

    // REPL
    pub const REPL_SHOW_GREETING: &str = "TALI_REPL_SHOW_GREETING";
    pub const REPL_SHOW_END_MARKER: &str = "TALI_REPL_SHOW_END_MARKER";
    pub const REPL_CONTINUE_ON_LONG_LINES: &str = "TALI_REPL_CONTINUE_ON_LONG_LINES";

    // Logging
    pub const LOG_LEVEL: &str = "TALI_LOG_LEVEL";
    pub const LOG_STRUCTURED: &str = "TALI_LOG_STRUCTURED";
    pub const LOG_CONSOLE: &str = "TALI_LOG_CONSOLE";
    pub const LOG_DETAILED_ERRORS: &str = "TALI_LOG_DETAILED_ERRORS";

    // Preferences file
    pub const CONFIG_FILE: &str = "TALI_CONFIG_FILE";
}

/// Read a boolean preference from the environment, falling back to `default`
/// when the variable is unset or not a valid bool
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to reject files without the .tali extension (user preference, not security)
    pub require_tali_extension: bool,

    /// Whether to log tokenization timing for processed files
    pub enable_performance_logging: bool,

    /// Whether to render source snippets under diagnostics
    pub show_source_snippets: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_tali_extension: env_flag(env_vars::REQUIRE_EXTENSION, false),
            enable_performance_logging: env_flag(env_vars::PERFORMANCE_LOGGING, true),
            show_source_snippets: env_flag(env_vars::SHOW_SOURCE_SNIPPETS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect per-class token counts during tokenization
    pub collect_detailed_metrics: bool,

    /// Whether to attach source positions to lexical diagnostics
    pub include_position_in_errors: bool,

    /// Whether to debug-log every token as it is produced
    pub log_token_stream: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
            include_position_in_errors: env_flag(env_vars::LEXICAL_INCLUDE_POSITIONS, true),
            log_token_stream: env_flag(env_vars::LEXICAL_LOG_TOKEN_STREAM, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplPreferences {
    /// Whether to print the greeting banner on session start
    pub show_greeting: bool,

    /// Whether to print the end-of-input token for each line
    pub show_end_marker: bool,

    /// Whether to tokenize lines that exceed the input length limit
    pub continue_on_long_lines: bool,
}

impl Default for ReplPreferences {
    fn default() -> Self {
        Self {
            show_greeting: env_flag(env_vars::REPL_SHOW_GREETING, true),
            show_end_marker: env_flag(env_vars::REPL_SHOW_END_MARKER, false),
            continue_on_long_lines: env_flag(env_vars::REPL_CONTINUE_ON_LONG_LINES, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// User preferred minimum log level
    pub min_log_level: LogLevel,

    /// Emit JSON lines instead of human-readable text
    pub use_structured_logging: bool,

    /// Whether log events are written to the console at all
    pub enable_console_logging: bool,

    /// Whether errors are rendered with full registry metadata
    pub detailed_error_reporting: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var(env_vars::LOG_LEVEL)
                .ok()
                .and_then(|value| parse_log_level(&value))
                .unwrap_or(LogLevel::Info),
            use_structured_logging: env_flag(env_vars::LOG_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOG_CONSOLE, true),
            detailed_error_reporting: env_flag(env_vars::LOG_DETAILED_ERRORS, false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    /// Convert to the level type the logging subsystem filters on
    pub fn to_events_log_level(&self) -> EventLevel {
        match self {
            Self::Error => EventLevel::Error,
            Self::Warning => EventLevel::Warning,
            Self::Info => EventLevel::Info,
            Self::Debug => EventLevel::Debug,
        }
    }

    /// Convert back from the logging subsystem's level type
    pub fn from_events_log_level(level: EventLevel) -> Self {
        match level {
            EventLevel::Error => Self::Error,
            EventLevel::Warning => Self::Warning,
            EventLevel::Info => Self::Info,
            EventLevel::Debug => Self::Debug,
        }
    }
}

/// Accepts names ("warn") and the numeric forms TALI_LOG_LEVEL documents.
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub repl: ReplPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from a TOML document; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Invalid preferences file: {}", e))
    }

    /// Load preferences, honoring TALI_CONFIG_FILE when set
    pub fn load() -> Result<Self, String> {
        match env::var(env_vars::CONFIG_FILE) {
            Ok(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Cannot read preferences file '{}': {}", path, e))?;
                Self::from_toml_str(&content)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_accepts_names_and_digits() {
        let table = [
            ("error", LogLevel::Error),
            ("ERROR", LogLevel::Error),
            ("0", LogLevel::Error),
            ("warn", LogLevel::Warning),
            ("warning", LogLevel::Warning),
            ("1", LogLevel::Warning),
            ("info", LogLevel::Info),
            ("2", LogLevel::Info),
            ("debug", LogLevel::Debug),
            ("3", LogLevel::Debug),
        ];
        for (input, expected) in table {
            assert_eq!(parse_log_level(input), Some(expected), "input {input:?}");
        }
        assert_eq!(parse_log_level("verbose"), None);
        assert_eq!(parse_log_level(""), None);
    }

    #[test]
    fn test_log_level_conversion_round_trip() {
        for level in [
            LogLevel::Error,
            LogLevel::Warning,
            LogLevel::Info,
            LogLevel::Debug,
        ] {
            let events_level = level.to_events_log_level();
            assert_eq!(LogLevel::from_events_log_level(events_level), level);
        }
    }

    #[test]
    fn test_env_flag_defaults_when_unset() {
        // A name no environment should define
        let name = "TALI_TEST_FLAG_THAT_IS_NEVER_SET";
        assert!(env_flag(name, true));
        assert!(!env_flag(name, false));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [repl]
            show_end_marker = true

            [logging]
            min_log_level = "Debug"
            "#,
        )
        .unwrap();

        assert!(config.repl.show_end_marker);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        // Untouched sections fall back to defaults
        assert!(config.lexical.collect_detailed_metrics);
    }

    #[test]
    fn test_console_logging_defaults_on() {
        // TALI_LOG_CONSOLE is never set by the test harness
        let preferences = LoggingPreferences::default();
        assert!(preferences.enable_console_logging);
    }

    #[test]
    fn test_console_logging_toml_override() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [logging]
            enable_console_logging = false
            "#,
        )
        .unwrap();

        assert!(!config.logging.enable_console_logging);
        // Sibling preferences keep their defaults
        assert!(!config.logging.use_structured_logging);
        assert_eq!(config.logging.min_log_level, LogLevel::Info);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = RuntimeConfig::from_toml_str("[repl\nshow_greeting = yes");
        assert!(result.is_err());
    }

    #[test]
    fn test_env_var_names_share_prefix() {
        let names = [
            env_vars::REQUIRE_EXTENSION,
            env_vars::PERFORMANCE_LOGGING,
            env_vars::SHOW_SOURCE_SNIPPETS,
            env_vars::LEXICAL_DETAILED_METRICS,
            env_vars::LEXICAL_INCLUDE_POSITIONS,
            env_vars::LEXICAL_LOG_TOKEN_STREAM,
            env_vars::REPL_SHOW_GREETING,
            env_vars::REPL_SHOW_END_MARKER,
            env_vars::REPL_CONTINUE_ON_LONG_LINES,
            env_vars::LOG_LEVEL,
            env_vars::LOG_STRUCTURED,
            env_vars::LOG_CONSOLE,
            env_vars::LOG_DETAILED_ERRORS,
            env_vars::CONFIG_FILE,
        ];

        for name in names {
            assert!(name.starts_with("TALI_"), "bad prefix on {}", name);
        }
    }
}
