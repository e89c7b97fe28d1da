//! Diagnostic code space and classification metadata
//!
//! Every reportable condition has a stable code: `S` system, `F` file
//! processing, `L` lexical analysis, `R` interactive session, `I` success.
//! Error codes carry registry metadata that drives how they are rendered
//! and whether processing can continue past them.

use std::collections::HashMap;
use std::sync::OnceLock;

/// A stable diagnostic code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// How serious an error condition is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Registry entry describing the behavior of one error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

/// Process-level failures (S-series)
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("S001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("S002");
    pub const INVALID_CONFIGURATION: Code = Code::new("S003");
}

/// Reading and validating source files (F-series)
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("F001");
    pub const FILE_READ_FAILED: Code = Code::new("F002");
    pub const FILE_TOO_LARGE: Code = Code::new("F003");
    pub const EXTENSION_MISMATCH: Code = Code::new("F004");
    pub const EMPTY_FILE: Code = Code::new("F005");
    pub const INVALID_ENCODING: Code = Code::new("F006");
}

/// Tokenization (L-series)
pub mod lexical {
    use super::Code;

    pub const ILLEGAL_CHARACTER: Code = Code::new("L001");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("L002");
}

/// Interactive session (R-series)
pub mod repl {
    use super::Code;

    pub const INPUT_LINE_TOO_LONG: Code = Code::new("R001");
    pub const INPUT_READ_FAILED: Code = Code::new("R002");
    pub const OUTPUT_WRITE_FAILED: Code = Code::new("R003");
}

/// Milestones worth reporting (I-series)
pub mod success {
    use super::Code;

    // General
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I002");

    // File processing
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I010");

    // Lexical analysis
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");

    // Interactive session
    pub const REPL_SESSION_COMPLETED: Code = Code::new("I030");
}

/// Metadata table, one row per error code
const ERROR_METADATA: &[ErrorMetadata] = &[
    ErrorMetadata {
        code: "S001",
        category: "System",
        severity: Severity::Critical,
        recoverable: false,
        requires_halt: true,
        description: "Internal error in the tokenizer toolchain",
        recommended_action: "Report the failure together with the command that triggered it",
    },
    ErrorMetadata {
        code: "S002",
        category: "System",
        severity: Severity::Critical,
        recoverable: false,
        requires_halt: true,
        description: "Global logging initialization failed",
        recommended_action: "Check TALI_* environment variables and retry",
    },
    ErrorMetadata {
        code: "S003",
        category: "System",
        severity: Severity::High,
        recoverable: false,
        requires_halt: true,
        description: "Runtime configuration failed validation",
        recommended_action: "Fix the offending TALI_* environment variable or rebuild with sane limits",
    },
    ErrorMetadata {
        code: "F001",
        category: "FileProcessing",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Source file does not exist",
        recommended_action: "Check the file path",
    },
    ErrorMetadata {
        code: "F002",
        category: "FileProcessing",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Source file could not be read",
        recommended_action: "Check file permissions and disk state",
    },
    ErrorMetadata {
        code: "F003",
        category: "FileProcessing",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Source file exceeds maximum size limit",
        recommended_action: "Reduce file size or rebuild with a larger limit",
    },
    ErrorMetadata {
        code: "F004",
        category: "FileProcessing",
        severity: Severity::Low,
        recoverable: true,
        requires_halt: false,
        description: "File does not have the .tali extension",
        recommended_action: "Rename the file with a .tali extension or verify the file type",
    },
    ErrorMetadata {
        code: "F005",
        category: "FileProcessing",
        severity: Severity::Low,
        recoverable: true,
        requires_halt: false,
        description: "Source file is empty",
        recommended_action: "Provide a file with content or check file integrity",
    },
    ErrorMetadata {
        code: "F006",
        category: "FileProcessing",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Source file is not valid UTF-8",
        recommended_action: "Convert the file to UTF-8 encoding",
    },
    ErrorMetadata {
        code: "L001",
        category: "Lexical",
        severity: Severity::Low,
        recoverable: true,
        requires_halt: false,
        description: "Unrecognized character in source text",
        recommended_action: "Remove the character or replace it with a supported one",
    },
    ErrorMetadata {
        code: "L002",
        category: "Lexical",
        severity: Severity::Low,
        recoverable: true,
        requires_halt: false,
        description: "Identifier exceeds the configured length limit",
        recommended_action: "Shorten the identifier",
    },
    ErrorMetadata {
        code: "R001",
        category: "Repl",
        severity: Severity::Low,
        recoverable: true,
        requires_halt: false,
        description: "Interactive input line exceeds the configured length limit",
        recommended_action: "Split the input across shorter lines",
    },
    ErrorMetadata {
        code: "R002",
        category: "Repl",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Failed to read from the session input stream",
        recommended_action: "Check the input stream and terminal state",
    },
    ErrorMetadata {
        code: "R003",
        category: "Repl",
        severity: Severity::Medium,
        recoverable: false,
        requires_halt: true,
        description: "Failed to write to the session output stream",
        recommended_action: "Check the output stream and terminal state",
    },
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| ERROR_METADATA.iter().map(|entry| (entry.code, entry)).collect())
}

/// Look up the registry entry for an error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    registry().get(code).copied()
}

/// Severity of an error code, `Medium` when unregistered
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code).map_or(Severity::Medium, |entry| entry.severity)
}

/// Whether processing can continue past this error
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code).map_or(true, |entry| entry.recoverable)
}

/// Whether this error must stop the current operation
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code).map_or(false, |entry| entry.requires_halt)
}

/// Human-readable description of an error code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown error", |entry| entry.description)
}

/// Suggested next step for an error code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code).map_or("No specific action available", |entry| entry.recommended_action)
}

/// Category an error code belongs to
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown", |entry| entry.category)
}

/// Cross-check the metadata table against the code constants
///
/// Run at startup so a constant added without a table row fails loudly
/// instead of reporting "Unknown error" at the first diagnostic.
pub fn verify_registry() -> Result<(), String> {
    let declared = [
        system::INTERNAL_ERROR,
        system::INITIALIZATION_FAILURE,
        system::INVALID_CONFIGURATION,
        file_processing::FILE_NOT_FOUND,
        file_processing::FILE_READ_FAILED,
        file_processing::FILE_TOO_LARGE,
        file_processing::EXTENSION_MISMATCH,
        file_processing::EMPTY_FILE,
        file_processing::INVALID_ENCODING,
        lexical::ILLEGAL_CHARACTER,
        lexical::IDENTIFIER_TOO_LONG,
        repl::INPUT_LINE_TOO_LONG,
        repl::INPUT_READ_FAILED,
        repl::OUTPUT_WRITE_FAILED,
    ];

    for code in declared {
        if get_error_metadata(code.as_str()).is_none() {
            return Err(format!("No metadata registered for diagnostic code {}", code));
        }
    }

    if declared.len() != ERROR_METADATA.len() {
        return Err(format!(
            "Metadata table has {} rows for {} declared error codes",
            ERROR_METADATA.len(),
            declared.len()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_code() {
        assert!(verify_registry().is_ok());
    }

    #[test]
    fn test_metadata_lookup() {
        let entry = get_error_metadata("L001").unwrap();
        assert_eq!(entry.category, "Lexical");
        assert_eq!(entry.severity, Severity::Low);
        assert!(entry.recoverable);
        assert!(!entry.requires_halt);
    }

    #[test]
    fn test_unknown_codes_get_defaults() {
        assert_eq!(get_severity("Z999"), Severity::Medium);
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert!(is_recoverable("Z999"));
        assert!(!requires_halt("Z999"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::High < Severity::Medium);
        assert!(Severity::Medium < Severity::Low);
    }

    #[test]
    fn test_halting_codes_are_not_recoverable() {
        for entry in ERROR_METADATA {
            if entry.requires_halt {
                assert!(
                    !entry.recoverable,
                    "{} halts but claims to be recoverable",
                    entry.code
                );
            }
        }
    }
}
