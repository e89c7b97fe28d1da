//! Source location tracking for the Tali toolchain
//!
//! The tokenizer itself only records byte offsets; line and column numbers
//! are derived on demand through [`SourceMap`] when a diagnostic needs them.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with byte offset, line, and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 0-based byte offset into the input
    pub offset: usize,
    /// 1-based line number
    pub line: u32,
    /// Column number (1-based, counted in characters)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Where the span begins (inclusive)
    pub start: Position,
    /// One past the last covered byte (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "span start past its end"
        );
        Self { start, end }
    }

    /// Create a span from bare byte offsets (line and column unresolved)
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self::new(Position::new(start, 0, 0), Position::new(end, 0, 0))
    }

    /// Smallest span covering both inputs
    pub fn merge(self, other: Self) -> Self {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Self { start, end }
    }

    /// Byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// True when the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the source text covered by this span
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start.offset..self.end.offset]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A value paired with its source location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spanned<T> {
    /// The value
    pub value: T,
    /// The source span
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    /// Transform the value, keeping the span
    pub fn map<U, F>(self, f: F) -> Spanned<U>
    where
        F: FnOnce(T) -> U,
    {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }

    /// Consume and return the inner value
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Display> fmt::Display for Spanned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Line-start index over a source buffer for offset-to-position lookup
#[derive(Debug, Clone)]
pub struct SourceMap {
    source: String,
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Index the given source text
    pub fn new(source: String) -> Self {
        // Newlines are ASCII, so a byte scan is UTF-8 safe here
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter_map(|(offset, byte)| (byte == b'\n').then_some(offset + 1)),
            )
            .collect();

        Self {
            source,
            line_starts,
        }
    }

    /// The indexed source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolve a byte offset to a full position
    pub fn position_at(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insertion) => insertion - 1,
        };

        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count() + 1;

        Position::new(offset, (line + 1) as u32, column as u32)
    }

    /// Resolve a pair of byte offsets to a span with line and column filled in
    pub fn span_at(&self, start: usize, end: usize) -> Span {
        Span::new(self.position_at(start), self.position_at(end))
    }

    /// Get a line of text by line number (1-based), without its terminator
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let line_idx = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next_start| next_start - 1)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Text covered by a resolved span
    pub fn span_text(&self, span: &Span) -> &str {
        span.slice(&self.source)
    }

    /// Render a diagnostic with the offending line and a caret underline
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        use std::fmt::Write as _;

        let mut out = String::new();
        let _ = writeln!(out, "Error: {}", message);
        let _ = writeln!(out, "  --> {}:{}", span.start.line, span.start.column);

        let Some(line) = self.get_line(span.start.line) else {
            return out;
        };

        let gutter = span.start.line.to_string();
        let blank = " ".repeat(gutter.len());
        let _ = writeln!(out, "   {} |", blank);
        let _ = writeln!(out, "{} | {}", gutter, line);

        let indent = " ".repeat((span.start.column - 1) as usize);
        // Multi-line spans underline to the end of the first line only
        let caret_count = if span.start.line == span.end.line {
            (span.end.column - span.start.column) as usize
        } else {
            line.chars().count() - indent.len()
        };
        let _ = writeln!(
            out,
            "   {} | {}{}",
            blank,
            indent,
            "^".repeat(caret_count.max(1))
        );

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge_covers_both() {
        let a = Span::from_offsets(2, 5);
        let b = Span::from_offsets(4, 9);
        let merged = a.merge(b);
        assert_eq!(merged.start.offset, 2);
        assert_eq!(merged.end.offset, 9);
        assert_eq!(merged.len(), 7);
    }

    #[test]
    fn test_span_slice() {
        let input = "let five = 5;";
        let span = Span::from_offsets(4, 8);
        assert_eq!(span.slice(input), "five");
        assert!(!span.is_empty());
        assert!(Span::from_offsets(4, 4).is_empty());
    }

    #[test]
    fn test_spanned_map_preserves_span() {
        let span = Span::from_offsets(0, 3);
        let spanned = Spanned::new("let", span).map(str::len);
        assert_eq!(spanned.value, 3);
        assert_eq!(spanned.span, span);
        assert_eq!(spanned.into_inner(), 3);
    }

    #[test]
    fn test_source_map_position_lookup() {
        let map = SourceMap::new("let x = 1;\nlet y = 2;\n".to_string());

        let first = map.position_at(4);
        assert_eq!(first.line, 1);
        assert_eq!(first.column, 5);

        let second = map.position_at(15);
        assert_eq!(second.line, 2);
        assert_eq!(second.column, 5);
        assert_eq!(second.to_string(), "2:5");

        assert_eq!(map.span_at(11, 16).to_string(), "2:1-6");
    }

    #[test]
    fn test_source_map_position_at_line_start() {
        let map = SourceMap::new("a\nb\n".to_string());
        let pos = map.position_at(2);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
    }

    #[test]
    fn test_source_map_get_line() {
        let map = SourceMap::new("first\nsecond\r\nthird".to_string());
        assert_eq!(map.get_line(1), Some("first"));
        assert_eq!(map.get_line(2), Some("second"));
        assert_eq!(map.get_line(3), Some("third"));
        assert_eq!(map.get_line(4), None);
        assert_eq!(map.get_line(0), None);
    }

    #[test]
    fn test_format_error_points_at_span() {
        let map = SourceMap::new("let @ = 5;\n".to_string());
        let span = map.span_at(4, 5);
        let rendered = map.format_error(&span, "unrecognized character '@'");

        assert!(rendered.contains("Error: unrecognized character '@'"));
        assert!(rendered.contains("--> 1:5"));
        assert!(rendered.contains("1 | let @ = 5;"));
        assert!(rendered.contains("    ^"));
    }
}
