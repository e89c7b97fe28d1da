//! Reserved keyword table for Tali
//!
//! Seven reserved words, matched case-sensitively against whole words. Any
//! spelling outside this table is an ordinary identifier, including prefixes,
//! suffixes, and case variants of the keywords themselves.
use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};

/// The reserved keywords of the Tali language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Function, // fn
    Let,      // let
    True,     // true
    False,    // false
    If,       // if
    Else,     // else
    Return,   // return
}

impl Keyword {
    /// Get the exact spelling as it appears in Tali source
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "fn",
            Self::Let => "let",
            Self::True => "true",
            Self::False => "false",
            Self::If => "if",
            Self::Else => "else",
            Self::Return => "return",
        }
    }

    /// Parse a keyword from a word with exact case matching
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "fn" => Some(Self::Function),
            "let" => Some(Self::Let),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            "return" => Some(Self::Return),
            // Every other word becomes an identifier
            _ => None,
        }
    }

    /// The token kind this keyword classifies as
    pub const fn token_kind(self) -> TokenKind {
        match self {
            Self::Function => TokenKind::Function,
            Self::Let => TokenKind::Let,
            Self::True => TokenKind::True,
            Self::False => TokenKind::False,
            Self::If => TokenKind::If,
            Self::Else => TokenKind::Else,
            Self::Return => TokenKind::Return,
        }
    }

    /// Check if this keyword spells a literal value
    pub const fn is_literal(self) -> bool {
        matches!(self, Self::True | Self::False)
    }

    /// Check if this keyword introduces control flow
    pub const fn is_control_flow(self) -> bool {
        matches!(self, Self::If | Self::Else | Self::Return)
    }

    /// Check if this keyword introduces a binding or definition
    pub const fn is_declaration(self) -> bool {
        matches!(self, Self::Function | Self::Let)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a word against the keyword table
///
/// Returns the keyword's token kind on an exact match and `None` otherwise.
/// Pure and total: no input panics or errs.
pub fn lookup(spelling: &str) -> Option<TokenKind> {
    Keyword::from_str(spelling).map(Keyword::token_kind)
}

/// The complete list of reserved keyword spellings
pub fn reserved_keywords() -> &'static [&'static str] {
    &["fn", "let", "true", "false", "if", "else", "return"]
}

/// Check if a word is reserved
pub fn is_reserved_keyword(s: &str) -> bool {
    Keyword::from_str(s).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYWORDS: [Keyword; 7] = [
        Keyword::Function,
        Keyword::Let,
        Keyword::True,
        Keyword::False,
        Keyword::If,
        Keyword::Else,
        Keyword::Return,
    ];

    #[test]
    fn test_spelling_round_trip() {
        for keyword in ALL_KEYWORDS {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(keyword));
        }
    }

    #[test]
    fn test_lookup_maps_every_keyword() {
        assert_eq!(lookup("fn"), Some(TokenKind::Function));
        assert_eq!(lookup("let"), Some(TokenKind::Let));
        assert_eq!(lookup("true"), Some(TokenKind::True));
        assert_eq!(lookup("false"), Some(TokenKind::False));
        assert_eq!(lookup("if"), Some(TokenKind::If));
        assert_eq!(lookup("else"), Some(TokenKind::Else));
        assert_eq!(lookup("return"), Some(TokenKind::Return));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup("Fn"), None);
        assert_eq!(lookup("LET"), None);
        assert_eq!(lookup("True"), None);
        assert_eq!(lookup("RETURN"), None);
    }

    #[test]
    fn test_lookup_rejects_near_misses() {
        assert_eq!(lookup("fnx"), None);
        assert_eq!(lookup("lets"), None);
        assert_eq!(lookup("i"), None);
        assert_eq!(lookup("elsewhere"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_reserved_list_matches_table() {
        let spellings = reserved_keywords();
        assert_eq!(spellings.len(), ALL_KEYWORDS.len());
        for spelling in spellings {
            assert!(is_reserved_keyword(spelling));
        }
        assert!(!is_reserved_keyword("foobar"));
    }

    #[test]
    fn test_keyword_groups() {
        assert!(Keyword::True.is_literal());
        assert!(Keyword::False.is_literal());
        assert!(Keyword::If.is_control_flow());
        assert!(Keyword::Return.is_control_flow());
        assert!(Keyword::Let.is_declaration());
        assert!(Keyword::Function.is_declaration());
        assert!(!Keyword::Let.is_literal());
        assert!(!Keyword::True.is_control_flow());
    }
}
