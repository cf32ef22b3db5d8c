//! # slrkit
//!
//! A small runtime for table-driven SLR(1) parsing. The grammar and the
//! action/goto tables are data, loaded from text at run time; nothing is
//! generated at build time.
//!
//! ## Overview
//!
//! - [`grammar`] loads `LHS -> s1 s2 ... sn` productions into a [`Grammar`].
//! - [`table`] loads comma-separated action/goto tables into a [`ParseTable`].
//! - [`parser`] runs the shift-reduce automaton ([`Parser`]) over anything
//!   implementing [`Token`], building a [`ParseTree`] or reporting a
//!   [`SyntaxError`] classified by a pluggable [`Diagnoser`].
//! - [`tree`] holds the parse tree types.
//! - [`span`] holds source positions and spans.
//! - [`error`] holds the loading and parsing error types.
//!
//! ## Example
//!
//! ```rust
//! use slrkit::{GenericDiagnoser, Grammar, ParseTable, Parser, Token};
//!
//! struct Word<'a>(&'a str);
//!
//! impl Token for Word<'_> {
//!     fn terminal(&self) -> &str {
//!         if self.0.chars().all(char::is_alphanumeric) { "id" } else { self.0 }
//!     }
//!     fn lexeme(&self) -> &str {
//!         self.0
//!     }
//! }
//!
//! let grammar = Grammar::load("S -> E\nE -> E + id\nE -> id\n").unwrap();
//! let table = ParseTable::load(
//!     ",+,id,$,E\n0,,s1,,2\n1,r2,,r2,\n2,s3,,acc,\n3,,s4,,\n4,r1,,r1,\n",
//! )
//! .unwrap();
//!
//! let tokens: Vec<Word> = "a + b".split(' ').map(Word).collect();
//! let tree = Parser::new(&grammar, &table)
//!     .parse(&tokens, &GenericDiagnoser)
//!     .unwrap();
//! assert_eq!(tree.to_string(), "S\n   E\n      E\n         a\n      +\n      b\n");
//! ```
pub mod error;
pub mod grammar;
pub mod parser;
pub mod span;
pub mod table;
pub mod tree;

/// Automaton state index.
pub type StateId = usize;
/// Production index into a [`Grammar`].
pub type ProdId = usize;

pub use error::{
    GrammarErrorKind, GrammarFormatError, InternalTableError, ParseError, SyntaxError,
    TableErrorKind, TableFormatError,
};
pub use grammar::{Grammar, Production};
pub use parser::{
    Diagnoser, GenericDiagnoser, ParseStack, Parser, ParserStats, Token, UnexpectedToken,
};
pub use span::{Position, SourceCursor, Span};
pub use table::{Action, END_MARKER, ParseTable};
pub use tree::{Node, ParseTree};
