//! # Parser Facade
//!
//! Ties the scanner, the built-in grammar and SLR table, the generic
//! [`slrkit::Parser`] engine and [`MinipasDiagnoser`] together.
//!
//! - [`GRAMMAR`] and [`SLR_TABLE`] are the built-in data files, embedded at
//!   compile time.
//! - [`load_grammar`], [`load_table`] and [`parse`] are the free-standing
//!   entry points over caller-supplied tables.
//! - [`MinipasParser`] owns a grammar and table and parses source text
//!   directly, keeping run statistics.
//!
//! # Example
//! ```rust
//! # use minipas::MinipasParser;
//! let mut parser = MinipasParser::try_new().unwrap();
//! let tree = parser.parse("program demo begin write 42 end .").unwrap();
//! assert_eq!(tree.root.symbol.as_str(), "Start");
//! assert!(tree.find("Write").is_some());
//! ```
use crate::{Diagnostic, Lexeme, MinipasDiagnoser, MinipasError, scan_all};
use slrkit::{
    Grammar, GrammarFormatError, ParseError, ParseTable, ParseTree, Parser, ParserStats,
    TableFormatError,
};

/// Built-in grammar, one production per line.
pub const GRAMMAR: &str = include_str!("minipas.grammar");

/// Built-in SLR(1) table matching [`GRAMMAR`].
pub const SLR_TABLE: &str = include_str!("minipas_slr.csv");

pub fn load_grammar(text: &str) -> Result<Grammar, GrammarFormatError> {
    Grammar::load(text)
}

pub fn load_table(text: &str) -> Result<ParseTable, TableFormatError> {
    ParseTable::load(text)
}

/// Parses a scanned token stream against `grammar` and `table`.
pub fn parse(
    tokens: &[Lexeme],
    grammar: &Grammar,
    table: &ParseTable,
) -> Result<ParseTree, ParseError<Diagnostic>> {
    Parser::new(grammar, table).parse(tokens, &MinipasDiagnoser)
}

/// Scanner plus engine over an owned grammar and table.
#[derive(Debug, Clone)]
pub struct MinipasParser {
    grammar: Grammar,
    table: ParseTable,
    stats: ParserStats,
}

impl MinipasParser {
    /// Uses the built-in grammar and table.
    pub fn try_new() -> Result<Self, MinipasError> {
        Self::from_sources(GRAMMAR, SLR_TABLE)
    }

    /// Loads a grammar and table from text.
    pub fn from_sources(grammar: &str, table: &str) -> Result<Self, MinipasError> {
        Ok(Self::new(load_grammar(grammar)?, load_table(table)?))
    }

    pub fn new(grammar: Grammar, table: ParseTable) -> Self {
        Self {
            grammar,
            table,
            stats: ParserStats::default(),
        }
    }

    #[inline]
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    #[inline]
    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    /// Totals over every parse run by this parser.
    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Scans and parses `source`.
    pub fn parse(&mut self, source: &str) -> Result<ParseTree, MinipasError> {
        let tokens = scan_all(source)?;
        self.parse_tokens(&tokens)
    }

    pub fn parse_tokens(&mut self, tokens: &[Lexeme]) -> Result<ParseTree, MinipasError> {
        let mut parser = Parser::new(&self.grammar, &self.table);
        let result = parser.parse(tokens, &MinipasDiagnoser);
        self.stats += parser.stats();
        Ok(result?)
    }
}
