//! Shared utilities for the Tali tokenizer and REPL
//!
//! Location-tracking primitives used by diagnostics and the file-mode
//! driver. The tokenizer itself stays offset-based and dependency-free.

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
