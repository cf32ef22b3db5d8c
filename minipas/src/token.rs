//! # Terminal Symbols and Lexemes
//!
//! This module defines the closed set of [`TerminalSymbol`]s the language's
//! grammar refers to and the [`Lexeme`] the scanner produces for each token.
//!
//! Every terminal has a fixed column name ([`TerminalSymbol::name`]) that
//! matches the header of the SLR table and the symbols of the grammar file.
//! [`Lexeme`] implements [`slrkit::Token`] by reporting that name, so the
//! scanner's output can be fed to the engine as is.
use slrkit::{Span, Token};
use smartstring::alias::String;
use std::fmt;

/// Every lexical category the grammar can reference.
///
/// # Example
/// ```rust
/// # use minipas::TerminalSymbol;
/// assert_eq!(TerminalSymbol::Assign.name(), ":=");
/// assert_eq!(TerminalSymbol::from_name("while"), Some(TerminalSymbol::While));
/// assert!(TerminalSymbol::While.is_keyword());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalSymbol {
    Plus,
    Minus,
    Times,
    Divide,
    Equal,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Assign,
    Program,
    Var,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    Read,
    Write,
    Integer,
    Boolean,
    True,
    False,
    Period,
    Colon,
    Semicolon,
    Identifier,
    IntegerLiteral,
    Eof,
}

impl TerminalSymbol {
    /// All terminals in table column order.
    pub const ALL: [TerminalSymbol; 31] = [
        Self::Plus,
        Self::Minus,
        Self::Times,
        Self::Divide,
        Self::Equal,
        Self::Less,
        Self::LessEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Assign,
        Self::Program,
        Self::Var,
        Self::Begin,
        Self::End,
        Self::If,
        Self::Then,
        Self::Else,
        Self::While,
        Self::Do,
        Self::Read,
        Self::Write,
        Self::Integer,
        Self::Boolean,
        Self::True,
        Self::False,
        Self::Period,
        Self::Colon,
        Self::Semicolon,
        Self::Identifier,
        Self::IntegerLiteral,
        Self::Eof,
    ];

    /// Grammar and table name of this terminal.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Equal => "=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Assign => ":=",
            Self::Program => "program",
            Self::Var => "var",
            Self::Begin => "begin",
            Self::End => "end",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::While => "while",
            Self::Do => "do",
            Self::Read => "read",
            Self::Write => "write",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::True => "true",
            Self::False => "false",
            Self::Period => ".",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Identifier => "identifier",
            Self::IntegerLiteral => "integer_literal",
            Self::Eof => slrkit::END_MARKER,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Reserved words; their name is also their (lowercase) spelling.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Program
                | Self::Var
                | Self::Begin
                | Self::End
                | Self::If
                | Self::Then
                | Self::Else
                | Self::While
                | Self::Do
                | Self::Read
                | Self::Write
                | Self::Integer
                | Self::Boolean
                | Self::True
                | Self::False
        )
    }

    /// Operators and punctuation; their name is also their spelling.
    pub const fn is_symbol(self) -> bool {
        !self.is_keyword()
            && !matches!(self, Self::Identifier | Self::IntegerLiteral | Self::Eof)
    }
}

impl fmt::Display for TerminalSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token: its terminal, its source text and where it was found.
///
/// # Example
/// ```rust
/// # use minipas::{Lexeme, TerminalSymbol};
/// # use slrkit::{Token, span};
/// let lx = Lexeme::new(TerminalSymbol::Identifier, "count", span!(0, 4, 0, 9));
/// assert_eq!(lx.terminal(), "identifier");
/// assert_eq!(lx.lexeme(), "count");
/// assert_eq!(lx.span().unwrap().start.column, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub terminal: TerminalSymbol,
    pub text: String,
    pub span: Option<Span>,
}

impl Lexeme {
    pub fn new(terminal: TerminalSymbol, text: &str, span: Option<Span>) -> Self {
        Self {
            terminal,
            text: text.into(),
            span,
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.terminal == TerminalSymbol::Eof
    }
}

impl Token for Lexeme {
    fn terminal(&self) -> &str {
        self.terminal.name()
    }

    fn lexeme(&self) -> &str {
        &self.text
    }

    fn span(&self) -> Option<Span> {
        self.span
    }
}
