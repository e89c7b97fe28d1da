//! Token definitions for Tali source text
//!
//! Every token pairs a [`TokenKind`] with the exact source substring it was
//! scanned from, so a token sequence can reproduce the input it came from.
//! Word classification is deliberately context-free: a word is either one of
//! the reserved keywords or an identifier, never both.
use crate::grammar::keywords;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of token kinds produced by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // === SPECIAL ===
    /// A character with no place in the language
    Illegal,
    /// End of the input text
    EndOfInput,

    // === IDENTIFIERS AND LITERALS ===
    /// User-defined name (letters and underscores only)
    Identifier,
    /// Unsigned decimal digit run
    IntegerLiteral,

    // === OPERATORS ===
    Assign,      // =
    Plus,        // +
    Minus,       // -
    Bang,        // !
    Asterisk,    // *
    Slash,       // /
    LessThan,    // <
    GreaterThan, // >
    Equal,       // ==
    NotEqual,    // !=

    // === DELIMITERS ===
    Comma,      // ,
    Semicolon,  // ;
    LeftParen,  // (
    RightParen, // )
    LeftBrace,  // {
    RightBrace, // }

    // === KEYWORDS ===
    Function, // fn
    Let,      // let
    True,     // true
    False,    // false
    If,       // if
    Else,     // else
    Return,   // return
}

impl TokenKind {
    /// Stable display name for this kind
    pub const fn name(self) -> &'static str {
        match self {
            Self::Illegal => "Illegal",
            Self::EndOfInput => "EndOfInput",
            Self::Identifier => "Identifier",
            Self::IntegerLiteral => "IntegerLiteral",
            Self::Assign => "Assign",
            Self::Plus => "Plus",
            Self::Minus => "Minus",
            Self::Bang => "Bang",
            Self::Asterisk => "Asterisk",
            Self::Slash => "Slash",
            Self::LessThan => "LessThan",
            Self::GreaterThan => "GreaterThan",
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
            Self::Comma => "Comma",
            Self::Semicolon => "Semicolon",
            Self::LeftParen => "LeftParen",
            Self::RightParen => "RightParen",
            Self::LeftBrace => "LeftBrace",
            Self::RightBrace => "RightBrace",
            Self::Function => "Function",
            Self::Let => "Let",
            Self::True => "True",
            Self::False => "False",
            Self::If => "If",
            Self::Else => "Else",
            Self::Return => "Return",
        }
    }

    /// Check if this kind is one of the reserved keywords
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Function
                | Self::Let
                | Self::True
                | Self::False
                | Self::If
                | Self::Else
                | Self::Return
        )
    }

    /// Check if this kind is an operator symbol
    pub const fn is_operator(self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::Plus
                | Self::Minus
                | Self::Bang
                | Self::Asterisk
                | Self::Slash
                | Self::LessThan
                | Self::GreaterThan
                | Self::Equal
                | Self::NotEqual
        )
    }

    /// Check if this kind is a delimiter
    pub const fn is_delimiter(self) -> bool {
        matches!(
            self,
            Self::Comma
                | Self::Semicolon
                | Self::LeftParen
                | Self::RightParen
                | Self::LeftBrace
                | Self::RightBrace
        )
    }

    /// Check if this kind carries user-written content
    pub const fn is_literal(self) -> bool {
        matches!(self, Self::Identifier | Self::IntegerLiteral)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single token: its kind and the exact source text it was scanned from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Classification of this token
    pub kind: TokenKind,
    /// Verbatim source substring
    pub literal: String,
}

impl Token {
    /// Create a token from a kind and its source text
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    /// Create a single-character token
    pub fn from_char(kind: TokenKind, ch: char) -> Self {
        Self {
            kind,
            literal: ch.to_string(),
        }
    }

    /// The end-of-input marker, with an empty literal
    pub fn end_of_input() -> Self {
        Self {
            kind: TokenKind::EndOfInput,
            literal: String::new(),
        }
    }

    /// An illegal token wrapping the offending character
    pub fn illegal(ch: char) -> Self {
        Self::from_char(TokenKind::Illegal, ch)
    }

    /// Check if this token marks the end of input
    pub fn is_end(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfInput)
    }

    /// Check if this token is an illegal character
    pub fn is_illegal(&self) -> bool {
        matches!(self.kind, TokenKind::Illegal)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            write!(f, "<end>")
        } else {
            write!(f, "{}", self.literal)
        }
    }
}

/// Token classification for metrics and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Reserved keywords
    Keyword,
    /// User-defined names
    Identifier,
    /// Integer literals
    Literal,
    /// Operator symbols
    Operator,
    /// Delimiters and punctuation
    Delimiter,
    /// Unrecognized characters
    Illegal,
    /// End-of-input marker
    End,
}

impl TokenKind {
    /// Get the classification of this kind
    pub fn token_class(self) -> TokenClass {
        if self.is_keyword() {
            TokenClass::Keyword
        } else if self.is_operator() {
            TokenClass::Operator
        } else if self.is_delimiter() {
            TokenClass::Delimiter
        } else {
            match self {
                Self::Identifier => TokenClass::Identifier,
                Self::IntegerLiteral => TokenClass::Literal,
                Self::Illegal => TokenClass::Illegal,
                _ => TokenClass::End,
            }
        }
    }
}

// === WORD CLASSIFICATION ===

/// Classify a scanned word as a keyword or an identifier
pub fn classify_word(word: &str) -> TokenKind {
    keywords::lookup(word).unwrap_or(TokenKind::Identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_word_keywords() {
        assert_eq!(classify_word("fn"), TokenKind::Function);
        assert_eq!(classify_word("let"), TokenKind::Let);
        assert_eq!(classify_word("true"), TokenKind::True);
        assert_eq!(classify_word("false"), TokenKind::False);
        assert_eq!(classify_word("if"), TokenKind::If);
        assert_eq!(classify_word("else"), TokenKind::Else);
        assert_eq!(classify_word("return"), TokenKind::Return);
    }

    #[test]
    fn test_classify_word_identifiers() {
        assert_eq!(classify_word("foobar"), TokenKind::Identifier);
        assert_eq!(classify_word("_private"), TokenKind::Identifier);
        // Case matters: only the exact lowercase spellings are keywords
        assert_eq!(classify_word("Let"), TokenKind::Identifier);
        assert_eq!(classify_word("FN"), TokenKind::Identifier);
        // Prefix of a keyword is still an identifier
        assert_eq!(classify_word("le"), TokenKind::Identifier);
        assert_eq!(classify_word("returns"), TokenKind::Identifier);
    }

    #[test]
    fn test_token_class_covers_all_kinds() {
        assert_eq!(TokenKind::Let.token_class(), TokenClass::Keyword);
        assert_eq!(TokenKind::Identifier.token_class(), TokenClass::Identifier);
        assert_eq!(TokenKind::IntegerLiteral.token_class(), TokenClass::Literal);
        assert_eq!(TokenKind::Equal.token_class(), TokenClass::Operator);
        assert_eq!(TokenKind::LeftBrace.token_class(), TokenClass::Delimiter);
        assert_eq!(TokenKind::Illegal.token_class(), TokenClass::Illegal);
        assert_eq!(TokenKind::EndOfInput.token_class(), TokenClass::End);
    }

    #[test]
    fn test_end_of_input_literal_is_empty() {
        let token = Token::end_of_input();
        assert_eq!(token.kind, TokenKind::EndOfInput);
        assert_eq!(token.literal, "");
        assert!(token.is_end());
    }

    #[test]
    fn test_token_display_is_source_text() {
        let token = Token::new(TokenKind::Equal, "==");
        assert_eq!(token.to_string(), "==");
        assert_eq!(Token::illegal('@').to_string(), "@");
    }
}
