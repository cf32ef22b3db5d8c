//! Error types for loading grammars and tables and for running the engine.
//!
//! Loading failures ([`GrammarFormatError`], [`TableFormatError`]) carry the
//! 1-based line of the offending input. Parse failures are split into
//! [`SyntaxError`], which blames the token stream, and [`InternalTableError`],
//! which blames the grammar/table pair. [`ParseError`] wraps both so callers
//! can tell the two apart.
//!
//! # Examples
//!
//! ```rust
//! # use slrkit::{Grammar, GrammarErrorKind};
//! let err = Grammar::load("S -> A\nbroken line\n").unwrap_err();
//! assert_eq!(err.line, 2);
//! assert_eq!(err.kind, GrammarErrorKind::MissingArrow);
//! assert_eq!(err.to_string(), "grammar line 2: missing `->` separator");
//! ```
use crate::{ProdId, Span, StateId};
use smartstring::alias::String;
use std::fmt;
use thiserror::Error;

/// A malformed production line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("grammar line {line}: {kind}")]
pub struct GrammarFormatError {
    /// 1-based line number in the grammar text.
    pub line: usize,
    pub kind: GrammarErrorKind,
}

/// What was wrong with a production line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarErrorKind {
    #[error("missing `->` separator")]
    MissingArrow,
    #[error("more than one `->` separator")]
    ExtraArrow,
    #[error("empty left-hand side")]
    EmptyLhs,
    #[error("left-hand side {0:?} is not a single symbol")]
    CompoundLhs(String),
}

/// A malformed parse table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("table row {row}: {kind}")]
pub struct TableFormatError {
    /// 1-based line number in the table text.
    pub row: usize,
    pub kind: TableErrorKind,
}

/// What was wrong with a table row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableErrorKind {
    #[error("no header row")]
    Empty,
    #[error("header has no `$` column")]
    MissingEndMarker,
    #[error("column {0:?} appears twice in the header")]
    DuplicateColumn(String),
    #[error("expected {expected} cells, found {found}")]
    Arity { expected: usize, found: usize },
    #[error("bad state id {0:?}")]
    BadState(String),
    #[error("bad cell {cell:?} in column {column:?}")]
    BadCell { column: String, cell: String },
}

/// No action exists for the current state and lookahead.
///
/// `code` is whatever the [`Diagnoser`](crate::Diagnoser) made of the
/// situation; `lookahead` is the terminal name (`$` at end of input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError<C> {
    pub code: C,
    pub state: StateId,
    pub lookahead: String,
    /// Lexeme text of the lookahead token, if there was one.
    pub lexeme: Option<String>,
    pub span: Option<Span>,
}

impl<C: fmt::Display> fmt::Display for SyntaxError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (state {}, lookahead `{}`)",
            self.code, self.state, self.lookahead
        )
    }
}

impl<C: fmt::Debug + fmt::Display> std::error::Error for SyntaxError<C> {}

/// The grammar and table disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalTableError {
    #[error("no goto for {symbol:?} in state {state}")]
    MissingGoto { state: StateId, symbol: String },
    #[error("state {state} reduces by unknown production {production}")]
    UnknownProduction { state: StateId, production: ProdId },
    #[error("state {state} shifts past the end of input")]
    ShiftPastEnd { state: StateId },
    #[error("parse stack underflow")]
    StackUnderflow,
    #[error("grammar has no start production")]
    EmptyGrammar,
}

/// Outcome of a failed parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError<C> {
    /// The token stream is not in the language.
    Syntax(SyntaxError<C>),
    /// The grammar/table pair is inconsistent.
    Internal(InternalTableError),
}

impl<C: fmt::Display> fmt::Display for ParseError<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax(err) => fmt::Display::fmt(err, f),
            ParseError::Internal(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl<C: fmt::Debug + fmt::Display> std::error::Error for ParseError<C> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Syntax(_) => None,
            ParseError::Internal(err) => Some(err),
        }
    }
}

impl<C> From<InternalTableError> for ParseError<C> {
    fn from(err: InternalTableError) -> Self {
        ParseError::Internal(err)
    }
}

impl<C> From<SyntaxError<C>> for ParseError<C> {
    fn from(err: SyntaxError<C>) -> Self {
        ParseError::Syntax(err)
    }
}

impl<C> ParseError<C> {
    /// The syntax error, if this is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError<C>> {
        match self {
            ParseError::Syntax(err) => Some(err),
            ParseError::Internal(_) => None,
        }
    }
}
