//! Source positions for lexemes, tree nodes and diagnostics.
//!
//! Lines and columns are 0-based and columns count characters, not bytes.
//! [`SourceCursor`] keeps both: the byte offset for slicing the source and
//! the [`Span`] of the lexeme being scanned.
//!
//! # Examples
//!
//! ```rust
//! # use slrkit::{Position, Span, span};
//! let word = Span::new(Position::new(3, 5), Position::new(3, 10));
//! let next = span!(3, 11, 4, 2).unwrap();
//! assert_eq!(word.merge(&next).to_string(), "3:5-4:2");
//! assert!(!word.is_empty());
//! ```
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// `line:column`
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range `[start, end)` with `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Moves `start` up to `end`, leaving an empty span.
    #[inline]
    pub fn collapse(&mut self) {
        self.start = self.end;
    }

    /// Smallest span covering both.
    pub fn merge(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// [`merge`](Span::merge) for spans that may be missing.
    pub fn merge_opt(a: Option<Span>, b: Option<Span>) -> Option<Span> {
        match (a, b) {
            (Some(a), Some(b)) => Some(a.merge(&b)),
            (a, b) => a.or(b),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// `start-end`, e.g. `1:2-1:10`.
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Scan position over a `&str`.
///
/// `pos` is the byte offset of the next unread character. `span` starts at
/// the first character of the current lexeme and ends at `pos`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCursor {
    pub pos: usize,
    pub span: Span,
}

impl SourceCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps over `ch`, which must be the character at `pos`.
    pub fn advance(&mut self, ch: char) {
        let end = &mut self.span.end;
        match ch {
            '\n' => {
                end.line += 1;
                end.column = 0;
            }
            _ => end.column += 1,
        }
        self.pos += ch.len_utf8();
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.span.end
    }
}

/// `Some(Span)` from start and end line/column pairs.
///
/// ```rust
/// # use slrkit::span;
/// let s = span!(0, 0, 1, 4);
/// assert_eq!(s.unwrap().end.column, 4);
/// ```
#[macro_export]
macro_rules! span {
    ($start_line:expr, $start_col:expr, $end_line:expr, $end_col:expr) => {
        Some($crate::Span::new(
            $crate::Position::new($start_line, $start_col),
            $crate::Position::new($end_line, $end_col),
        ))
    };
}
