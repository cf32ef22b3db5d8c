//! # Error Diagnoser
//!
//! When the engine finds no action, [`MinipasDiagnoser`] guesses what went
//! wrong from the topmost stacked symbol and the lookahead. The heuristics are
//! tried in order and the first match wins:
//!
//! 1. nothing shifted yet: the program must start with `program`;
//! 2. `.` on top: the program is over, end of input was expected;
//! 3. `end` on top and at end of input: the closing `.` is missing;
//! 4. `program`, `var` or `read` on top: an identifier must follow;
//! 5. `:` on top: a data type must follow;
//! 6. `:=`, `write` or an arithmetic operator on top: an operand must follow;
//! 7. an `if` or `while` not yet matched by `then` or `do`: the keyword is
//!    missing;
//! 8. `;` on top: another statement or declaration keyword must follow;
//! 9. anything else: a generic syntax error.
//!
//! This is a best-effort classifier for one small language. Some inputs get a
//! misleading diagnostic; the codes for missing source or table files are
//! never produced here.
use crate::TerminalSymbol as T;
use crate::{ErrorCode, TerminalSymbol};
use slrkit::{Diagnoser, END_MARKER, ParseStack, StateId, Token};
use std::fmt;

/// Outcome of diagnosing a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    EofExpected,
    IdentifierExpected,
    SpecialWordMissing,
    SymbolMissing,
    DataTypeExpected,
    IdentifierOrLiteralExpected,
    SyntaxError,
}

impl Diagnostic {
    pub fn code(self) -> ErrorCode {
        match self {
            Self::EofExpected => ErrorCode::EofExpected,
            Self::IdentifierExpected => ErrorCode::IdentifierExpected,
            Self::SpecialWordMissing => ErrorCode::SpecialWordMissing,
            Self::SymbolMissing => ErrorCode::SymbolMissing,
            Self::DataTypeExpected => ErrorCode::DataTypeExpected,
            Self::IdentifierOrLiteralExpected => ErrorCode::IdentifierOrLiteralExpected,
            Self::SyntaxError => ErrorCode::SyntaxError,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().message())
    }
}

/// Diagnoser for the built-in grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinipasDiagnoser;

impl<K: Token> Diagnoser<K> for MinipasDiagnoser {
    type Code = Diagnostic;

    fn diagnose(&self, stack: &ParseStack, _state: StateId, remaining: &[K]) -> Diagnostic {
        let lookahead = remaining.first().map_or(END_MARKER, |t| t.terminal());
        let Some(top) = stack.top_symbol() else {
            return Diagnostic::SpecialWordMissing;
        };
        let is = |t: TerminalSymbol| top == t.name();

        if is(T::Period) {
            Diagnostic::EofExpected
        } else if is(T::End) && lookahead == END_MARKER {
            Diagnostic::EofExpected
        } else if [T::Program, T::Var, T::Read].into_iter().any(is) {
            Diagnostic::IdentifierExpected
        } else if is(T::Colon) {
            Diagnostic::DataTypeExpected
        } else if [T::Assign, T::Write, T::Plus, T::Minus, T::Times, T::Divide]
            .into_iter()
            .any(is)
        {
            Diagnostic::IdentifierOrLiteralExpected
        } else if has_open_condition(stack) {
            Diagnostic::SymbolMissing
        } else if is(T::Semicolon) {
            Diagnostic::SpecialWordMissing
        } else {
            Diagnostic::SyntaxError
        }
    }
}

/// Is there an `if`/`while` above the last `then`/`do` on the stack?
fn has_open_condition(stack: &ParseStack) -> bool {
    for sym in stack.symbols().iter().rev() {
        match T::from_name(sym) {
            Some(T::Then | T::Do) => return false,
            Some(T::If | T::While) => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::MinipasParser;
    use super::*;

    fn diagnose(source: &str) -> (Diagnostic, StateId, String) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut parser = MinipasParser::try_new().unwrap();
        match parser.parse(source) {
            Err(crate::MinipasError::Syntax(err)) => (err.code, err.state, err.lookahead.into()),
            other => panic!("expected a syntax error for {source:?}, got {other:?}"),
        }
    }

    #[test]
    fn identifier_expected_after_program() {
        assert_eq!(
            diagnose("program begin end ."),
            (Diagnostic::IdentifierExpected, 1, "begin".into())
        );
    }

    #[test]
    fn identifier_expected_after_var_and_read() {
        assert_eq!(
            diagnose("program x var begin end .").0,
            Diagnostic::IdentifierExpected
        );
        assert_eq!(
            diagnose("program x begin read end .").0,
            Diagnostic::IdentifierExpected
        );
    }

    #[test]
    fn eof_expected_after_period() {
        assert_eq!(
            diagnose("program x begin read x end . x"),
            (Diagnostic::EofExpected, 25, "identifier".into())
        );
        assert_eq!(
            diagnose("program x begin x := 1 end . end").0,
            Diagnostic::EofExpected
        );
    }

    #[test]
    fn missing_period_at_end_of_input() {
        assert_eq!(
            diagnose("program x begin read x end"),
            (Diagnostic::EofExpected, 43, "$".into())
        );
    }

    #[test]
    fn data_type_expected_after_colon() {
        assert_eq!(
            diagnose("program x var x : begin end ."),
            (Diagnostic::DataTypeExpected, 26, "begin".into())
        );
    }

    #[test]
    fn operand_expected_after_operators() {
        assert_eq!(
            diagnose("program x begin x := end .").0,
            Diagnostic::IdentifierOrLiteralExpected
        );
        assert_eq!(
            diagnose("program x begin write x + end .").0,
            Diagnostic::IdentifierOrLiteralExpected
        );
    }

    #[test]
    fn then_or_do_missing_in_conditions() {
        assert_eq!(
            diagnose("program x begin if x then write x end ."),
            (Diagnostic::SymbolMissing, 34, "then".into())
        );
        assert_eq!(
            diagnose("program x begin if x < then write x end .").0,
            Diagnostic::SymbolMissing
        );
        assert_eq!(
            diagnose("program x begin while x < 2 write x end .").0,
            Diagnostic::SymbolMissing
        );
    }

    #[test]
    fn keyword_missing_after_semicolon() {
        assert_eq!(
            diagnose("program x begin read x ; end ."),
            (Diagnostic::SpecialWordMissing, 44, "end".into())
        );
        assert_eq!(
            diagnose("program x var y : integer ; 5 begin end .").0,
            Diagnostic::SpecialWordMissing
        );
    }

    #[test]
    fn program_keyword_missing_at_start() {
        assert_eq!(
            diagnose("begin end ."),
            (Diagnostic::SpecialWordMissing, 0, "begin".into())
        );
        assert_eq!(diagnose(""), (Diagnostic::SpecialWordMissing, 0, "$".into()));
    }

    #[test]
    fn falls_back_to_syntax_error() {
        assert_eq!(
            diagnose("program x begin read x write x end ."),
            (Diagnostic::SyntaxError, 38, "write".into())
        );
    }

    #[test]
    fn diagnostics_display_their_message() {
        assert_eq!(Diagnostic::SymbolMissing.to_string(), "symbol missing");
        assert_eq!(Diagnostic::SyntaxError.code().number(), 99);
        assert_eq!(Diagnostic::DataTypeExpected.code().number(), 10);
    }
}
