//! Core lexer implementation
//!
//! On-demand scanner over an owned source buffer. Each call to next_token
//! skips whitespace, classifies the character under the cursor, and advances
//! exactly once past the consumed text.

use crate::tokens::{classify_word, Token, TokenClass, TokenKind};

/// Forward-only scanner with one character of lookahead.
///
/// Cursor invariant: `read_position` marks where the next advance resumes,
/// one byte past `position` for everything the language recognizes (all
/// ASCII) and one full character past it for illegal input. Both indexes
/// may point past the end once the `\0` sentinel has been reached. The
/// scanner never backtracks.
pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
}

impl Lexer {
    pub fn new(input: impl Into<String>) -> Self {
        let mut lexer = Self {
            input: input.into(),
            position: 0,
            read_position: 0,
            ch: 0,
        };
        lexer.read_char();
        lexer
    }

    /// Byte offset of the character under the cursor, clamped to the input
    /// length.
    ///
    /// After next_token returns, this is one past the consumed token, so the
    /// token's source range is `offset - literal.len() .. offset`.
    pub fn offset(&self) -> usize {
        self.position.min(self.input.len())
    }

    /// Produce the next token. Never fails: unrecognized characters come
    /// back as `Illegal` tokens, and exhausted input repeats `EndOfInput`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::Equal, "==")
                } else {
                    Token::from_char(TokenKind::Assign, '=')
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::NotEqual, "!=")
                } else {
                    Token::from_char(TokenKind::Bang, '!')
                }
            }
            b'+' => Token::from_char(TokenKind::Plus, '+'),
            b'-' => Token::from_char(TokenKind::Minus, '-'),
            b'/' => Token::from_char(TokenKind::Slash, '/'),
            b'*' => Token::from_char(TokenKind::Asterisk, '*'),
            b'<' => Token::from_char(TokenKind::LessThan, '<'),
            b'>' => Token::from_char(TokenKind::GreaterThan, '>'),
            b';' => Token::from_char(TokenKind::Semicolon, ';'),
            b',' => Token::from_char(TokenKind::Comma, ','),
            b'(' => Token::from_char(TokenKind::LeftParen, '('),
            b')' => Token::from_char(TokenKind::RightParen, ')'),
            b'{' => Token::from_char(TokenKind::LeftBrace, '{'),
            b'}' => Token::from_char(TokenKind::RightBrace, '}'),
            0 => Token::end_of_input(),
            ch if is_letter(ch) => {
                // The word scan leaves the cursor on the first character
                // after the token; return here to avoid a double advance.
                let literal = self.read_word();
                return Token::new(classify_word(&literal), literal);
            }
            ch if ch.is_ascii_digit() => {
                let literal = self.read_number();
                return Token::new(TokenKind::IntegerLiteral, literal);
            }
            _ => {
                // Consume the whole character, which may be more than one
                // byte, so the cursor stays on a character boundary.
                let ch = self.current_char();
                self.read_position = self.position + ch.len_utf8();
                Token::illegal(ch)
            }
        };

        self.read_char();
        token
    }

    /// Advance the cursor one character, installing the sentinel at the end.
    fn read_char(&mut self) {
        self.ch = self
            .input
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    /// Inspect the next character without committing the cursor.
    fn peek_char(&self) -> u8 {
        self.input
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0)
    }

    /// Decode the full character under the cursor. Everything the scanner
    /// recognizes is ASCII, so this only matters for illegal input.
    fn current_char(&self) -> char {
        self.input[self.position..].chars().next().unwrap_or('\0')
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn read_word(&mut self) -> String {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        self.input[start..self.position].to_string()
    }
}

// Letters and underscore only. Digits never continue a word, so "foo123"
// scans as a word followed by an integer literal.
fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Token distribution accumulated by draining callers.
///
/// The scanner itself stays four fields; whoever pulls the tokens counts
/// them.
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub integer_tokens: usize,
    pub operator_tokens: usize,
    pub delimiter_tokens: usize,
    pub illegal_tokens: usize,
    pub next_token_calls: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token) {
        self.next_token_calls += 1;

        let class = token.kind.token_class();
        if class != TokenClass::End {
            self.total_tokens += 1;
        }

        match class {
            TokenClass::Keyword => self.keyword_tokens += 1,
            TokenClass::Identifier => self.identifier_tokens += 1,
            TokenClass::Literal => self.integer_tokens += 1,
            TokenClass::Operator => self.operator_tokens += 1,
            TokenClass::Delimiter => self.delimiter_tokens += 1,
            TokenClass::Illegal => self.illegal_tokens += 1,
            TokenClass::End => {}
        }
    }

    pub fn has_illegal_tokens(&self) -> bool {
        self.illegal_tokens > 0
    }
}
