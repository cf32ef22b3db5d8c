//! # minipas
//!
//! A syntax analyzer for a small Pascal-like teaching language, built on
//! **slrkit**. Source text is scanned into [`Lexeme`]s, run through an
//! SLR(1) automaton driven by a grammar file and a precomputed table, and
//! either turned into a [`ParseTree`](slrkit::ParseTree) or rejected with a
//! numbered diagnostic.
//!
//! ## Overview
//!
//! - [`token`]: the [`TerminalSymbol`] catalogue and the [`Lexeme`] type.
//! - [`lexer`]: the character-class driven [`Scanner`].
//! - [`parser`]: the built-in [`GRAMMAR`] and [`SLR_TABLE`], free-standing
//!   loaders and the [`MinipasParser`] facade.
//! - [`diagnose`]: [`MinipasDiagnoser`], which guesses a [`Diagnostic`] from
//!   the stack when the table has no action.
//! - [`error`]: [`LexicalError`], [`ErrorCode`] and [`MinipasError`].
//!
//! ## Example
//!
//! ```rust
//! use minipas::{ErrorCode, MinipasParser};
//!
//! let mut parser = MinipasParser::try_new().unwrap();
//!
//! let tree = parser.parse("program x begin x := 1 + 2 end .").unwrap();
//! let leaves: Vec<_> = tree.leaves().into_iter().map(|n| n.label()).collect();
//! assert_eq!(leaves, ["program", "x", "begin", "x", ":=", "1", "+", "2", "end", "."]);
//!
//! let err = parser.parse("program begin end .").unwrap_err();
//! assert_eq!(err.code(), ErrorCode::IdentifierExpected);
//! ```
pub mod diagnose;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use diagnose::{Diagnostic, MinipasDiagnoser};
pub use error::{ErrorCode, LexicalError, MinipasError};
pub use lexer::{CharClass, RESERVED_WORDS, SYMBOLS, Scanner, scan_all};
pub use parser::{GRAMMAR, MinipasParser, SLR_TABLE, load_grammar, load_table, parse};
pub use token::{Lexeme, TerminalSymbol};
