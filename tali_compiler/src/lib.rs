// Internal modules
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod repl;
pub mod tokens;
pub mod utils;

// The flat surface most callers want
pub use lexical::{tokenize, Lexer, LexicalMetrics};
pub use tokens::{Token, TokenKind};

// Re-export span utilities for diagnostic consumers
pub use utils::{SourceMap, Span, Spanned};
