//! Grammar definitions for Tali

pub mod ast;
pub mod keywords;

// Re-export AST types
pub use ast::{Expression, Node, Program, Statement};

// Re-export keywords
pub use keywords::{is_reserved_keyword, lookup, Keyword};
