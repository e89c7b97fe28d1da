//! Token system for Tali lexical analysis
//!
//! This module defines the vocabulary of the Tali language: the closed
//! [`TokenKind`] enumeration, the [`Token`] value pairing a kind with its
//! verbatim source text, and the context-free word classifier.
//!
//! # Overview
//!
//! Tokens carry the exact substring they were scanned from. Joining the
//! literals of a token sequence (with whitespace reinserted) reconstructs
//! the original input, which keeps downstream error reporting honest.
//!
//! ## Token Kinds
//!
//! - **Operators**: `=`, `+`, `-`, `!`, `*`, `/`, `<`, `>`, `==`, `!=`
//! - **Delimiters**: `,`, `;`, `(`, `)`, `{`, `}`
//! - **Keywords**: `fn`, `let`, `true`, `false`, `if`, `else`, `return`
//! - **Identifiers**: letter and underscore runs; digits never join a word
//! - **Integer literals**: unsigned decimal digit runs
//! - **Special**: `Illegal` for unrecognized characters, `EndOfInput` at
//!   the end of the text

pub mod token;

pub use token::{classify_word, Token, TokenClass, TokenKind};
