//! # Errors and Diagnostic Codes
//!
//! This module defines:
//!
//! - [`LexicalError`]: the scanner met a character it cannot use,
//! - [`ErrorCode`]: the numbered catalogue of user-facing diagnostics,
//!   printed as `Error NN: message`,
//! - [`MinipasError`]: a single error surface over scanning, loading and
//!   parsing, with `#[from]` conversions so `?` works at call sites.
//!
//! Every [`MinipasError`] maps to exactly one [`ErrorCode`] via
//! [`MinipasError::code`].
use crate::Diagnostic;
use slrkit::{
    GrammarFormatError, InternalTableError, ParseError, Position, SyntaxError, TableFormatError,
};
use std::fmt;
use thiserror::Error;

/// The scanner found a character outside every usable class, or an
/// operator/punctuation lexeme with no terminal.
///
/// # Example
/// ```rust
/// # use minipas::{LexicalError, scan_all};
/// # use slrkit::Position;
/// let err = scan_all("x := #").unwrap_err();
/// assert_eq!(err, LexicalError { offending_char: '#', position: Position::new(0, 5) });
/// assert_eq!(err.to_string(), "unexpected character '#' at 0:5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected character {offending_char:?} at {position}")]
pub struct LexicalError {
    pub offending_char: char,
    pub position: Position,
}

/// Numbered diagnostics.
///
/// # Example
/// ```rust
/// # use minipas::ErrorCode;
/// assert_eq!(ErrorCode::IdentifierExpected.to_string(), "Error 07: identifier expected");
/// assert_eq!(ErrorCode::SyntaxError.number(), 99);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    SourceFileMissing = 1,
    CannotOpenSource = 2,
    Lexical = 3,
    CannotOpenGrammar = 4,
    CannotOpenTable = 5,
    EofExpected = 6,
    IdentifierExpected = 7,
    SpecialWordMissing = 8,
    SymbolMissing = 9,
    DataTypeExpected = 10,
    IdentifierOrLiteralExpected = 11,
    InternalTable = 98,
    SyntaxError = 99,
}

impl ErrorCode {
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::SourceFileMissing => "source file missing",
            Self::CannotOpenSource => "couldn't open source file",
            Self::Lexical => "lexical error",
            Self::CannotOpenGrammar => "couldn't open grammar file",
            Self::CannotOpenTable => "couldn't open SLR table file",
            Self::EofExpected => "EOF expected",
            Self::IdentifierExpected => "identifier expected",
            Self::SpecialWordMissing => "special word missing",
            Self::SymbolMissing => "symbol missing",
            Self::DataTypeExpected => "data type expected",
            Self::IdentifierOrLiteralExpected => "identifier or literal value expected",
            Self::InternalTable => "inconsistent grammar and SLR table",
            Self::SyntaxError => "syntax error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {:02}: {}", self.number(), self.message())
    }
}

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinipasError {
    /// Scanning failed.
    #[error("{0}")]
    Lexical(#[from] LexicalError),

    /// The grammar text is malformed.
    #[error("malformed grammar: {0}")]
    Grammar(#[from] GrammarFormatError),

    /// The table text is malformed.
    #[error("malformed SLR table: {0}")]
    Table(#[from] TableFormatError),

    /// The program is not in the language.
    #[error("{0}")]
    Syntax(#[from] SyntaxError<Diagnostic>),

    /// The grammar and table do not belong together.
    #[error("{0}")]
    Internal(#[from] InternalTableError),
}

impl MinipasError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Lexical(_) => ErrorCode::Lexical,
            Self::Grammar(_) => ErrorCode::CannotOpenGrammar,
            Self::Table(_) => ErrorCode::CannotOpenTable,
            Self::Syntax(err) => err.code.code(),
            Self::Internal(_) => ErrorCode::InternalTable,
        }
    }
}

impl From<ParseError<Diagnostic>> for MinipasError {
    fn from(err: ParseError<Diagnostic>) -> Self {
        match err {
            ParseError::Syntax(err) => Self::Syntax(err),
            ParseError::Internal(err) => Self::Internal(err),
        }
    }
}
