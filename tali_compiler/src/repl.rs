//! Interactive read-tokenize-print loop
//!
//! Reads one line at a time, runs a fresh lexer over it, and writes each
//! token's debug rendering to the output stream. Generic over the streams
//! so tests can drive it with in-memory buffers.

use crate::config::compile_time::repl::{MAX_INPUT_LINE_LENGTH, PROMPT};
use crate::config::runtime::ReplPreferences;
use crate::lexical::{Lexer, LexicalMetrics};
use crate::log_success;
use crate::logging::{codes, LogEvent};
use std::io::{self, BufRead, Write};

/// REPL stream failures
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error("Failed to read input line: {0}")]
    InputRead(#[source] io::Error),

    #[error("Failed to write output: {0}")]
    OutputWrite(#[source] io::Error),
}

impl ReplError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ReplError::InputRead(_) => codes::repl::INPUT_READ_FAILED,
            ReplError::OutputWrite(_) => codes::repl::OUTPUT_WRITE_FAILED,
        }
    }
}

/// Run the loop with default preferences.
pub fn run(input: impl BufRead, output: impl Write) -> Result<LexicalMetrics, ReplError> {
    run_with_preferences(input, output, &ReplPreferences::default())
}

/// Run the loop until the input stream is exhausted.
///
/// Every line gets its own lexer; no scanner state survives between lines.
/// Token metrics accumulate across the whole session and are returned to
/// the caller.
pub fn run_with_preferences(
    mut input: impl BufRead,
    mut output: impl Write,
    preferences: &ReplPreferences,
) -> Result<LexicalMetrics, ReplError> {
    if preferences.show_greeting {
        writeln!(output, "This is the Tali programming language.").map_err(ReplError::OutputWrite)?;
        writeln!(output, "Type source text to see its tokens.").map_err(ReplError::OutputWrite)?;
    }

    let mut lines_read = 0usize;
    let mut metrics = LexicalMetrics::default();

    loop {
        write!(output, "{}", PROMPT).map_err(ReplError::OutputWrite)?;
        output.flush().map_err(ReplError::OutputWrite)?;

        let mut line = String::new();
        let bytes_read = input.read_line(&mut line).map_err(ReplError::InputRead)?;
        if bytes_read == 0 {
            // End of stream exits the session cleanly
            break;
        }

        lines_read += 1;

        if line.len() > MAX_INPUT_LINE_LENGTH {
            let event = LogEvent::warning_with_code(
                codes::repl::INPUT_LINE_TOO_LONG,
                "Input line exceeds configured length",
            )
            .with_context("length", &line.len().to_string())
            .with_context("limit", &MAX_INPUT_LINE_LENGTH.to_string());
            crate::logging::dispatch(event);

            if !preferences.continue_on_long_lines {
                continue;
            }
        }

        let mut lexer = Lexer::new(line.as_str());
        loop {
            let token = lexer.next_token();
            metrics.record_token(&token);
            if token.is_end() {
                if preferences.show_end_marker {
                    writeln!(output, "{:?}", token).map_err(ReplError::OutputWrite)?;
                }
                break;
            }

            writeln!(output, "{:?}", token).map_err(ReplError::OutputWrite)?;
        }
    }

    log_success!(codes::success::REPL_SESSION_COMPLETED,
        "REPL session completed",
        "lines" => lines_read,
        "tokens" => metrics.total_tokens,
        "keywords" => metrics.keyword_tokens,
        "identifiers" => metrics.identifier_tokens,
        "integers" => metrics.integer_tokens,
        "operators" => metrics.operator_tokens,
        "delimiters" => metrics.delimiter_tokens,
        "illegal" => metrics.illegal_tokens
    );

    Ok(metrics)
}

/// Convenience entry point binding the standard streams.
pub fn run_stdio(preferences: &ReplPreferences) -> Result<LexicalMetrics, ReplError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with_preferences(stdin.lock(), stdout.lock(), preferences)
}
