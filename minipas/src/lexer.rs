//! # Lexical Scanner
//!
//! A hand-written scanner driven by character classes. Each call to
//! [`Scanner::scan`] skips blanks, looks at the class of the next character
//! and consumes one lexeme:
//!
//! - a letter starts a maximal run of letters and digits, looked up
//!   case-insensitively in [`RESERVED_WORDS`] and otherwise an identifier;
//! - a digit starts a maximal run of digits, an integer literal;
//! - an operator character is taken alone, or together with a following `=`
//!   when it is `<`, `>` or `:`, and looked up in [`SYMBOLS`];
//! - a punctuator character is taken alone and looked up in [`SYMBOLS`];
//! - end of input yields the [`TerminalSymbol::Eof`] lexeme.
//!
//! Anything else, or a symbol lexeme with no terminal (`(`, `)`, `,`), is a
//! [`LexicalError`]. Every call consumes at least one character unless the
//! input is exhausted.
//!
//! # Example
//! ```rust
//! # use minipas::{scan_all, TerminalSymbol};
//! let lexemes = scan_all("x := y + 1").unwrap();
//! let terminals: Vec<_> = lexemes.iter().map(|l| l.terminal).collect();
//! assert_eq!(
//!     terminals,
//!     [
//!         TerminalSymbol::Identifier,
//!         TerminalSymbol::Assign,
//!         TerminalSymbol::Identifier,
//!         TerminalSymbol::Plus,
//!         TerminalSymbol::IntegerLiteral,
//!         TerminalSymbol::Eof,
//!     ]
//! );
//! ```
use crate::{LexicalError, Lexeme, TerminalSymbol};
use once_cell::sync::Lazy;
use slrkit::SourceCursor;
use std::collections::HashMap;

/// Classification of a single input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    EndOfInput,
    Letter,
    Digit,
    OperatorChar,
    PunctuatorChar,
    Quote,
    Blank,
    Other,
}

impl CharClass {
    /// Classifies `ch`; `None` is end of input.
    pub fn of(ch: Option<char>) -> Self {
        let Some(ch) = ch else {
            return Self::EndOfInput;
        };
        match ch {
            c if c.is_alphabetic() => Self::Letter,
            c if c.is_ascii_digit() => Self::Digit,
            '+' | '-' | '*' | '/' | '=' | '<' | '>' | ':' | '(' | ')' => Self::OperatorChar,
            '.' | ',' | ';' => Self::PunctuatorChar,
            '"' => Self::Quote,
            ' ' | '\t' | '\n' | '\r' => Self::Blank,
            _ => Self::Other,
        }
    }
}

/// Reserved word (lowercase) to keyword terminal.
pub static RESERVED_WORDS: Lazy<HashMap<&'static str, TerminalSymbol>> = Lazy::new(|| {
    TerminalSymbol::ALL
        .into_iter()
        .filter(|t| t.is_keyword())
        .map(|t| (t.name(), t))
        .collect()
});

/// Operator and punctuation spelling to terminal.
pub static SYMBOLS: Lazy<HashMap<&'static str, TerminalSymbol>> = Lazy::new(|| {
    TerminalSymbol::ALL
        .into_iter()
        .filter(|t| t.is_symbol())
        .map(|t| (t.name(), t))
        .collect()
});

/// Characters that may be followed by `=` to form a two-character operator.
const EQ_PREFIXES: [char; 3] = ['<', '>', ':'];

/// Scanner over a borrowed source string.
///
/// Besides [`scan`](Scanner::scan), the scanner is an [`Iterator`] of
/// `Result<Lexeme, LexicalError>` that yields the end-of-input lexeme once and
/// then stops; it also stops after the first error.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    cursor: SourceCursor,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: SourceCursor::new(),
            done: false,
        }
    }

    /// The part of the source not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.source[self.cursor.pos..]
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    #[inline]
    fn peek_class(&self) -> CharClass {
        CharClass::of(self.peek())
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.cursor.advance(ch);
        Some(ch)
    }

    fn bump_while(&mut self, pred: impl Fn(CharClass) -> bool) {
        while pred(self.peek_class()) {
            self.bump();
        }
    }

    /// Scans the next lexeme. At end of input, returns the end-of-input
    /// lexeme on every call.
    pub fn scan(&mut self) -> Result<Lexeme, LexicalError> {
        self.bump_while(|c| c == CharClass::Blank);
        self.cursor.span.collapse();
        let start = self.cursor.pos;
        let position = self.cursor.position();

        let terminal = match self.peek_class() {
            CharClass::EndOfInput => TerminalSymbol::Eof,
            CharClass::Letter => {
                self.bump_while(|c| matches!(c, CharClass::Letter | CharClass::Digit));
                let word = self.source[start..self.cursor.pos].to_lowercase();
                RESERVED_WORDS
                    .get(word.as_str())
                    .copied()
                    .unwrap_or(TerminalSymbol::Identifier)
            }
            CharClass::Digit => {
                self.bump_while(|c| c == CharClass::Digit);
                TerminalSymbol::IntegerLiteral
            }
            CharClass::OperatorChar | CharClass::PunctuatorChar => {
                let offending_char = self.bump().unwrap_or_default();
                if EQ_PREFIXES.contains(&offending_char) && self.peek() == Some('=') {
                    self.bump();
                }
                let text = &self.source[start..self.cursor.pos];
                *SYMBOLS.get(text).ok_or(LexicalError {
                    offending_char,
                    position,
                })?
            }
            CharClass::Quote | CharClass::Blank | CharClass::Other => {
                let offending_char = self.bump().unwrap_or_default();
                return Err(LexicalError {
                    offending_char,
                    position,
                });
            }
        };

        let text = &self.source[start..self.cursor.pos];
        log::trace!("Scan {:?} {:?}", terminal, text);
        Ok(Lexeme::new(terminal, text, Some(self.cursor.span)))
    }

    /// Like [`scan`](Scanner::scan), but returns `None` after the
    /// end-of-input lexeme or an error has been returned.
    pub fn try_next(&mut self) -> Result<Option<Lexeme>, LexicalError> {
        if self.done {
            return Ok(None);
        }
        match self.scan() {
            Ok(lexeme) => {
                self.done = lexeme.is_eof();
                Ok(Some(lexeme))
            }
            Err(err) => {
                self.done = true;
                Err(err)
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Lexeme, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }
}

/// Scans all of `source`. The result always ends with the end-of-input lexeme.
pub fn scan_all(source: &str) -> Result<Vec<Lexeme>, LexicalError> {
    Scanner::new(source).collect()
}
