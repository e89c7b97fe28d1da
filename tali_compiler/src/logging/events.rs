//! Log events carrying a level, a diagnostic code, and optional context

use super::codes::Code;
use super::{codes, config};
use crate::utils::Span;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Code attached to warnings raised without a registered code
const GENERIC_WARNING: Code = Code::new("W000");
/// Code attached to plain informational messages
const GENERIC_INFO: Code = Code::new("I000");
/// Code attached to plain debug messages
const GENERIC_DEBUG: Code = Code::new("D000");

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
}

/// One reportable occurrence, timestamped at construction
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub span: Option<Span>,
    pub context: HashMap<String, String>,
}

impl LogEvent {
    fn at_level(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: clamp_message(message),
            span: None,
            context: HashMap::new(),
        }
    }

    /// An error event addressed by its diagnostic code
    pub fn error(code: Code, message: &str) -> Self {
        Self::at_level(LogLevel::Error, code, message)
    }

    /// A warning without a dedicated code
    pub fn warning(message: &str) -> Self {
        Self::at_level(LogLevel::Warning, GENERIC_WARNING, message)
    }

    /// A warning addressed by its diagnostic code
    pub fn warning_with_code(code: Code, message: &str) -> Self {
        Self::at_level(LogLevel::Warning, code, message)
    }

    /// An informational event without a dedicated code
    pub fn info(message: &str) -> Self {
        Self::at_level(LogLevel::Info, GENERIC_INFO, message)
    }

    /// A success event, reported at info level under its success code
    pub fn success(code: Code, message: &str) -> Self {
        Self::at_level(LogLevel::Info, code, message)
    }

    /// A debug event without a dedicated code
    pub fn debug(message: &str) -> Self {
        Self::at_level(LogLevel::Debug, GENERIC_DEBUG, message)
    }

    /// Attach the source span this event refers to
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach one key-value context pair
    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    /// Attach the file this event refers to
    pub fn with_file_path(self, path: &str) -> Self {
        self.with_context("file_path", path)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.level, LogLevel::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.level, LogLevel::Warning)
    }

    pub fn is_info(&self) -> bool {
        matches!(self.level, LogLevel::Info)
    }

    pub fn is_debug(&self) -> bool {
        matches!(self.level, LogLevel::Debug)
    }

    /// Whether this event's code halts the current operation
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.code.as_str())
    }

    /// Registry severity of this event's code
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.code.as_str()).as_str()
    }

    /// Registry category of this event's code
    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    /// Registry description of this event's code
    pub fn description(&self) -> &'static str {
        codes::get_description(self.code.as_str())
    }

    /// Registry recommended action for this event's code
    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.code.as_str())
    }

    /// Whether this event's code allows processing to continue
    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.code.as_str())
    }

    /// One-line human-readable rendering
    pub fn format(&self) -> String {
        match &self.span {
            Some(span) => format!(
                "[{}] {} - {} at {}:{}",
                self.level.as_str(),
                self.code,
                self.message,
                span.start.line,
                span.start.column
            ),
            None => format!("[{}] {} - {}", self.level.as_str(), self.code, self.message),
        }
    }

    /// Multi-line rendering with timestamp, registry metadata, and context
    pub fn format_detailed(&self) -> String {
        let mut out = self.format();

        let _ = write!(out, "\n  Timestamp: {}", self.timestamp.to_rfc3339());
        let _ = write!(out, "\n  Category: {}", self.category());
        let _ = write!(out, "\n  Severity: {}", self.severity());

        if self.is_error() {
            let _ = write!(out, "\n  Recoverable: {}", self.is_recoverable());
            let _ = write!(out, "\n  Requires halt: {}", self.requires_halt());
        }

        let description = self.description();
        if description != "Unknown error" {
            let _ = write!(out, "\n  Description: {}", description);
        }

        let action = self.recommended_action();
        if action != "No specific action available" {
            let _ = write!(out, "\n  Recommended action: {}", action);
        }

        if !self.context.is_empty() {
            out.push_str("\n  Context:");
            for (key, value) in &self.context {
                let _ = write!(out, "\n    {}: {}", key, value);
            }
        }

        out
    }

    /// Single-line JSON rendering for log shippers
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        use serde_json::{json, Map, Value};

        let mut fields = Map::new();
        fields.insert("timestamp".into(), json!(self.timestamp.timestamp()));
        fields.insert(
            "timestamp_rfc3339".into(),
            json!(self.timestamp.to_rfc3339()),
        );
        fields.insert("level".into(), json!(self.level.as_str()));
        fields.insert("code".into(), json!(self.code.as_str()));
        fields.insert("message".into(), json!(self.message));
        fields.insert("category".into(), json!(self.category()));
        fields.insert("severity".into(), json!(self.severity()));

        if self.is_error() {
            fields.insert(
                "error_metadata".into(),
                json!({
                    "recoverable": self.is_recoverable(),
                    "requires_halt": self.requires_halt(),
                    "description": self.description(),
                    "recommended_action": self.recommended_action(),
                }),
            );
        }

        if let Some(span) = &self.span {
            fields.insert(
                "span".into(),
                json!({
                    "start_line": span.start.line,
                    "start_column": span.start.column,
                    "end_line": span.end.line,
                    "end_column": span.end.column,
                }),
            );
        }

        if !self.context.is_empty() {
            fields.insert("context".into(), json!(self.context));
        }

        serde_json::to_string(&Value::Object(fields))
    }
}

/// Truncate a message to the compile-time length limit, on a char boundary
fn clamp_message(message: &str) -> String {
    let limit = config::get_max_log_message_length();
    if message.len() <= limit {
        return message.to_string();
    }

    let mut end = limit;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::SourceMap;

    #[test]
    fn test_error_event_carries_registry_category() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Source file missing");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "F001");
        assert_eq!(event.message, "Source file missing");
        assert_eq!(event.category(), "FileProcessing");
        assert!(event.requires_halt());
    }

    #[test]
    fn test_success_is_info_level() {
        let event = LogEvent::success(codes::success::TOKENIZATION_COMPLETE, "Input tokenized");

        assert!(event.is_info());
        assert_eq!(event.code.as_str(), "I020");
    }

    #[test]
    fn test_generic_constructors_use_reserved_codes() {
        assert_eq!(LogEvent::warning("w").code.as_str(), "W000");
        assert_eq!(LogEvent::info("i").code.as_str(), "I000");
        assert_eq!(LogEvent::debug("d").code.as_str(), "D000");
    }

    #[test]
    fn test_context_accumulates() {
        let event = LogEvent::error(
            codes::file_processing::FILE_TOO_LARGE,
            "Source exceeds size limit",
        )
        .with_context("size_bytes", "2048")
        .with_context("limit", "1024")
        .with_file_path("big.tali");

        assert_eq!(event.context.get("size_bytes"), Some(&"2048".to_string()));
        assert_eq!(event.context.get("limit"), Some(&"1024".to_string()));
        assert_eq!(event.context.get("file_path"), Some(&"big.tali".to_string()));
    }

    #[test]
    fn test_format_without_span() {
        let event = LogEvent::error(codes::lexical::ILLEGAL_CHARACTER, "Unrecognized character");
        let formatted = event.format();

        assert!(formatted.starts_with("[ERROR] L001 - Unrecognized character"));
        assert!(!formatted.contains(" at "));
    }

    #[test]
    fn test_format_with_span_appends_position() {
        let map = SourceMap::new("let @ = 5;\n".to_string());
        let event = LogEvent::error(codes::lexical::ILLEGAL_CHARACTER, "Unrecognized character")
            .with_span(map.span_at(4, 5));

        assert!(event.format().ends_with(" at 1:5"));
    }

    #[test]
    fn test_critical_metadata_passthrough() {
        let event = LogEvent::error(codes::system::INTERNAL_ERROR, "Registry verification failed");

        assert_eq!(event.severity(), "Critical");
        assert_eq!(event.category(), "System");
        assert!(!event.is_recoverable());
        assert!(event.requires_halt());
    }

    #[test]
    fn test_json_rendering() {
        let event = LogEvent::error(
            codes::file_processing::FILE_READ_FAILED,
            "Source file unreadable",
        )
        .with_context("file", "test.tali");

        let json = event.format_json().unwrap();
        assert!(json.contains("\"level\":\"ERROR\""));
        assert!(json.contains("\"code\":\"F002\""));
        assert!(json.contains("\"message\":\"Source file unreadable\""));
        assert!(json.contains("timestamp_rfc3339"));
        assert!(json.contains("error_metadata"));
    }

    #[test]
    fn test_detailed_rendering_includes_timestamp_and_action() {
        let event = LogEvent::error(codes::lexical::ILLEGAL_CHARACTER, "Unrecognized character");
        let detailed = event.format_detailed();

        assert!(detailed.contains("Timestamp: "));
        assert!(detailed.contains(&event.timestamp.to_rfc3339()));
        assert!(detailed.contains("Recommended action: "));
    }

    #[test]
    fn test_oversized_messages_are_clamped() {
        let oversized = "x".repeat(config::get_max_log_message_length() + 50);
        let event = LogEvent::info(&oversized);

        assert!(event.message.len() < oversized.len());
        assert!(event.message.ends_with("..."));
    }
}
