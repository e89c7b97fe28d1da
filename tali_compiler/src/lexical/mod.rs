//! Lexical analysis module
//!
//! Provides on-demand tokenization of Tali source text plus draining
//! helpers that collect metrics and integrate with the global logging
//! system. The scanner itself never fails; illegal characters surface as
//! tokens and are reported by the draining layer.

pub mod lexer;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::logging::LogEvent;
use crate::tokens::{Token, TokenKind};
use crate::utils::{SourceMap, Spanned};
use crate::{log_debug, log_error};

pub use lexer::{Lexer, LexicalMetrics};

// ============================================================================
// DRAINING HELPERS
// ============================================================================

/// Tokenize a complete source text.
///
/// The returned sequence includes the terminal end-of-input token.
pub fn tokenize(source: &str) -> (Vec<Token>, LexicalMetrics) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::with_capacity(TOKEN_BUFFER_CAPACITY);
    let mut metrics = LexicalMetrics::default();

    loop {
        let token = lexer.next_token();
        metrics.record_token(&token);
        let done = token.is_end();
        tokens.push(token);
        if done {
            break;
        }
    }

    (tokens, metrics)
}

/// Tokenize with resolved source ranges, honoring runtime preferences.
///
/// Every produced token carries the span of the source text it was scanned
/// from; illegal characters and over-length identifiers are reported
/// through the global logging system as they are encountered.
pub fn tokenize_with_spans(
    source_map: &SourceMap,
    preferences: &LexicalPreferences,
) -> (Vec<Spanned<Token>>, LexicalMetrics) {
    let mut lexer = Lexer::new(source_map.source());
    let mut tokens = Vec::with_capacity(TOKEN_BUFFER_CAPACITY);
    let mut metrics = LexicalMetrics::default();

    loop {
        let token = lexer.next_token();
        metrics.record_token(&token);

        let end = lexer.offset();
        let span = source_map.span_at(end - token.literal.len(), end);

        if preferences.log_token_stream {
            log_debug!("Token produced",
                "kind" => token.kind,
                "literal" => token.literal.as_str(),
                "offset" => span.start.offset
            );
        }

        if token.is_illegal() {
            if preferences.include_position_in_errors {
                log_error!(codes::lexical::ILLEGAL_CHARACTER, "Illegal character in input",
                    span = span,
                    "character" => token.literal.as_str()
                );
            } else {
                log_error!(codes::lexical::ILLEGAL_CHARACTER, "Illegal character in input",
                    "character" => token.literal.as_str()
                );
            }
        } else if token.kind == TokenKind::Identifier && token.literal.len() > MAX_IDENTIFIER_LENGTH
        {
            let mut event = LogEvent::warning_with_code(
                codes::lexical::IDENTIFIER_TOO_LONG,
                "Identifier exceeds configured length",
            )
            .with_context("length", &token.literal.len().to_string())
            .with_context("limit", &MAX_IDENTIFIER_LENGTH.to_string());
            if preferences.include_position_in_errors {
                event = event.with_span(span);
            }
            crate::logging::dispatch(event);
        }

        let done = token.is_end();
        tokens.push(Spanned::new(token, span));
        if done {
            break;
        }
    }

    (tokens, metrics)
}

// ============================================================================
// STARTUP VERIFICATION
// ============================================================================

/// Validate lexical diagnostic codes at startup.
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let test_codes = [
        codes::lexical::ILLEGAL_CHARACTER,
        codes::lexical::IDENTIFIER_TOO_LONG,
    ];

    for code in &test_codes {
        if codes::get_description(code.as_str()) == "Unknown error" {
            return Err(format!(
                "Lexical code {} has no description",
                code.as_str()
            ));
        }

        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Lexical limits initialized",
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "token_buffer_capacity" => TOKEN_BUFFER_CAPACITY
    );

    Ok(())
}
