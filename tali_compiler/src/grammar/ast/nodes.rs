//! AST node traits and the program aggregate
//!
//! The tokenizer's consumers build trees from nodes that can always point
//! back at the source text they came from. Only the structural seam lives
//! here: the node capability traits and the top-level [`Program`] container.
//! Concrete statement and expression types arrive with the parser.
use std::fmt;

/// Anything that occupies a place in a syntax tree
///
/// Every node can report the literal of the token it was built from, which
/// keeps diagnostics anchored to the user's own spelling.
pub trait Node {
    /// The source literal of this node's defining token
    fn token_literal(&self) -> &str;
}

/// Capability marker for nodes that act as statements
pub trait Statement: Node {}

/// Capability marker for nodes that act as expressions
pub trait Expression: Node {}

/// A parsed program: an ordered sequence of statements
#[derive(Default)]
pub struct Program {
    /// Statements in source order
    pub statements: Vec<Box<dyn Statement>>,
}

impl Program {
    /// Create an empty program
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    /// Append a statement
    pub fn push(&mut self, statement: Box<dyn Statement>) {
        self.statements.push(statement);
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the program has no statements
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program {
    /// The first statement's literal, or the empty string for an empty program
    fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(statement) => statement.token_literal(),
            None => "",
        }
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("statements", &self.statements.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubStatement {
        literal: String,
    }

    impl Node for StubStatement {
        fn token_literal(&self) -> &str {
            &self.literal
        }
    }

    impl Statement for StubStatement {}

    fn stub(literal: &str) -> Box<dyn Statement> {
        Box::new(StubStatement {
            literal: literal.to_string(),
        })
    }

    #[test]
    fn test_empty_program_has_empty_literal() {
        let program = Program::new();
        assert!(program.is_empty());
        assert_eq!(program.token_literal(), "");
    }

    #[test]
    fn test_program_reports_first_statement_literal() {
        let mut program = Program::new();
        program.push(stub("let"));
        program.push(stub("return"));

        assert_eq!(program.len(), 2);
        assert_eq!(program.token_literal(), "let");
    }
}
