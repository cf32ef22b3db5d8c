//! The shift-reduce engine.
//!
//! [`Parser`] drives an SLR(1) automaton over a slice of tokens using a
//! [`Grammar`] and a [`ParseTable`]. It keeps a [`ParseStack`] of states and
//! symbols and a parallel stack of tree fragments, one per stacked symbol.
//! When the table has no action for the current state and lookahead, a
//! [`Diagnoser`] classifies the failure and parsing stops.
//!
//! # Examples
//!
//! ```rust
//! # use slrkit::{Grammar, ParseTable, Parser, GenericDiagnoser, Token};
//! struct Tok(&'static str);
//! impl Token for Tok {
//!     fn terminal(&self) -> &str { self.0 }
//!     fn lexeme(&self) -> &str { self.0 }
//! }
//!
//! let grammar = Grammar::load("S -> L\nL -> item L\nL ->\n").unwrap();
//! let table = ParseTable::load(",item,$,L\n0,s1,r2,2\n1,s1,r2,3\n2,,acc,\n3,,r1,\n").unwrap();
//! let mut parser = Parser::new(&grammar, &table);
//! let tree = parser.parse(&[Tok("item")], &GenericDiagnoser).unwrap();
//! assert_eq!(tree.to_string(), "S\n   L\n      item\n      L\n");
//! assert_eq!(parser.stats().shifts, 1);
//! ```
use crate::error::{InternalTableError, ParseError, SyntaxError};
use crate::table::END_MARKER;
use crate::{Action, Grammar, Node, ParseTable, ParseTree, Span, StateId};
use smartstring::alias::String;
use std::fmt;
use std::ops::AddAssign;

/// A classified token as seen by the engine.
pub trait Token {
    /// Table column this token is looked up under.
    fn terminal(&self) -> &str;

    /// Source text; becomes the label of the token's leaf.
    fn lexeme(&self) -> &str;

    fn span(&self) -> Option<Span> {
        None
    }
}

/// Classifies a parse failure from the automaton's state.
///
/// `remaining` starts at the lookahead token; it is empty when the stream
/// ran out, in which case the lookahead is the end marker.
pub trait Diagnoser<T: Token> {
    type Code;

    fn diagnose(&self, stack: &ParseStack, state: StateId, remaining: &[T]) -> Self::Code;
}

/// Reports every failure as [`UnexpectedToken`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDiagnoser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnexpectedToken;

impl fmt::Display for UnexpectedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("syntax error")
    }
}

impl<T: Token> Diagnoser<T> for GenericDiagnoser {
    type Code = UnexpectedToken;

    fn diagnose(&self, _stack: &ParseStack, _state: StateId, _remaining: &[T]) -> UnexpectedToken {
        UnexpectedToken
    }
}

impl<T, C, F> Diagnoser<T> for F
where
    T: Token,
    F: Fn(&ParseStack, StateId, &[T]) -> C,
{
    type Code = C;

    fn diagnose(&self, stack: &ParseStack, state: StateId, remaining: &[T]) -> C {
        self(stack, state, remaining)
    }
}

/// States and symbols of the automaton. The bottom state is always 0 and
/// there is always one more state than symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStack {
    states: Vec<StateId>,
    symbols: Vec<String>,
}

impl Default for ParseStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseStack {
    pub fn new() -> Self {
        Self {
            states: vec![0],
            symbols: Vec::new(),
        }
    }

    #[inline]
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    /// Stacked symbols, bottom first.
    #[inline]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    #[inline]
    pub fn top_state(&self) -> StateId {
        self.states.last().copied().unwrap_or_default()
    }

    #[inline]
    pub fn top_symbol(&self) -> Option<&str> {
        self.symbols.last().map(|s| s.as_str())
    }

    /// Number of stacked symbols.
    #[inline]
    pub fn depth(&self) -> usize {
        self.symbols.len()
    }

    fn push(&mut self, symbol: &str, state: StateId) {
        self.symbols.push(symbol.into());
        self.states.push(state);
    }

    fn pop(&mut self, n: usize) -> Result<(), InternalTableError> {
        if n > self.symbols.len() {
            return Err(InternalTableError::StackUnderflow);
        }
        self.symbols.truncate(self.symbols.len() - n);
        self.states.truncate(self.states.len() - n);
        Ok(())
    }
}

/// Alternating `state symbol state ...` from the bottom.
impl fmt::Display for ParseStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.states[0])?;
        for (sym, state) in self.symbols.iter().zip(self.states.iter().skip(1)) {
            write!(f, " {} {}", sym, state)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserStats {
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
}

impl AddAssign for ParserStats {
    fn add_assign(&mut self, other: Self) {
        self.tokens += other.tokens;
        self.shifts += other.shifts;
        self.reductions += other.reductions;
    }
}

/// SLR(1) shift-reduce parser over borrowed tables.
///
/// Each call to [`parse`](Parser::parse) owns its own stacks, so any number
/// of parsers can share one grammar and table.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    grammar: &'a Grammar,
    table: &'a ParseTable,
    stats: ParserStats,
}

impl<'a> Parser<'a> {
    pub fn new(grammar: &'a Grammar, table: &'a ParseTable) -> Self {
        Self {
            grammar,
            table,
            stats: ParserStats::default(),
        }
    }

    #[inline]
    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    #[inline]
    pub fn table(&self) -> &'a ParseTable {
        self.table
    }

    /// Totals over every parse run by this parser.
    pub fn stats(&self) -> ParserStats {
        self.stats
    }

    /// Parses `tokens` to a tree rooted at the start symbol.
    ///
    /// Reading past the end of `tokens` yields the end marker, so a trailing
    /// end-of-input token is optional. Tokens after an explicit end marker
    /// are a syntax error, reported at the first of them. On accept, all
    /// remaining fragments become children of a node labelled with
    /// production 0's left-hand side.
    pub fn parse<T, D>(
        &mut self,
        tokens: &[T],
        diagnoser: &D,
    ) -> Result<ParseTree, ParseError<D::Code>>
    where
        T: Token,
        D: Diagnoser<T>,
    {
        let mut stack = ParseStack::new();
        let mut fragments: Vec<Node> = Vec::new();
        let mut pos = 0;

        loop {
            let state = stack.top_state();
            let lookahead = tokens.get(pos);
            let terminal = lookahead.map_or(END_MARKER, |t| t.terminal());
            if log::log_enabled!(log::Level::Trace) {
                dump_state(&stack, terminal);
            }

            match self.table.action(state, terminal) {
                Action::Shift(next) => {
                    let Some(token) = lookahead else {
                        return Err(InternalTableError::ShiftPastEnd { state }.into());
                    };
                    log::trace!("Shift {} -> {}", terminal, next);
                    fragments.push(Node::leaf(terminal, token.lexeme(), token.span()));
                    stack.push(terminal, next);
                    pos += 1;
                    self.stats.tokens += 1;
                    self.stats.shifts += 1;
                }

                Action::Reduce(prod_id) => {
                    let production = self.grammar.production(prod_id).ok_or(
                        InternalTableError::UnknownProduction {
                            state,
                            production: prod_id,
                        },
                    )?;
                    log::trace!("Reduce {}. {}", prod_id, production);
                    let n = production.len();
                    stack.pop(n)?;
                    let Some(split) = fragments.len().checked_sub(n) else {
                        return Err(InternalTableError::StackUnderflow.into());
                    };
                    let children = fragments.split_off(split);

                    let top = stack.top_state();
                    let next = self.table.goto(top, &production.lhs).ok_or_else(|| {
                        InternalTableError::MissingGoto {
                            state: top,
                            symbol: production.lhs.clone(),
                        }
                    })?;
                    fragments.push(Node::branch(&production.lhs, children));
                    stack.push(&production.lhs, next);
                    self.stats.reductions += 1;
                }

                Action::Accept if pos + 1 < tokens.len() => {
                    // An explicit end marker with tokens after it.
                    let rest = &tokens[pos + 1..];
                    let code = diagnoser.diagnose(&stack, state, rest);
                    log::debug!("accept in state {} with {} tokens left", state, rest.len());
                    return Err(syntax_error(code, state, &rest[0]));
                }

                Action::Accept => {
                    let start = self
                        .grammar
                        .start_symbol()
                        .ok_or(InternalTableError::EmptyGrammar)?;
                    log::trace!("Accept");
                    return Ok(ParseTree::new(Node::branch(start, fragments)));
                }

                Action::Error => {
                    let remaining = &tokens[pos..];
                    let code = diagnoser.diagnose(&stack, state, remaining);
                    log::debug!("no action in state {} on {:?}", state, terminal);
                    return Err(match lookahead {
                        Some(token) => syntax_error(code, state, token),
                        None => ParseError::Syntax(SyntaxError {
                            code,
                            state,
                            lookahead: END_MARKER.into(),
                            lexeme: None,
                            span: None,
                        }),
                    });
                }
            }
        }
    }
}

fn syntax_error<T: Token, C>(code: C, state: StateId, token: &T) -> ParseError<C> {
    ParseError::Syntax(SyntaxError {
        code,
        state,
        lookahead: token.terminal().into(),
        lexeme: Some(token.lexeme().into()),
        span: token.span(),
    })
}

fn dump_state(stack: &ParseStack, incoming: &str) {
    log::trace!("{}  <-  {}", stack, incoming);
}

#[cfg(test)]
mod tests {
    use crate::span;
    use super::*;

    const EXPR_GRAMMAR: &str = "S -> E
E -> E + T
E -> T
T -> T * F
T -> F
F -> ( E )
F -> id
";

    const EXPR_TABLE: &str = ",+,*,(,),id,$,E,T,F
0,,,s1,,s2,,3,4,5
1,,,s1,,s2,,6,4,5
2,r6,r6,,r6,,r6,,,
3,s7,,,,,acc,,,
4,r2,s8,,r2,,r2,,,
5,r4,r4,,r4,,r4,,,
6,s7,,,s9,,,,,
7,,,s1,,s2,,,10,5
8,,,s1,,s2,,,,11
9,r5,r5,,r5,,r5,,,
10,r1,s8,,r1,,r1,,,
11,r3,r3,,r3,,r3,,,
";

    const LIST_GRAMMAR: &str = "S -> L\nL -> item L\nL ->\n";
    const LIST_TABLE: &str = ",item,$,L\n0,s1,r2,2\n1,s1,r2,3\n2,,acc,\n3,,r1,\n";

    #[derive(Debug, Clone)]
    struct Tok {
        terminal: &'static str,
        text: &'static str,
        span: Option<Span>,
    }

    impl Token for Tok {
        fn terminal(&self) -> &str {
            self.terminal
        }
        fn lexeme(&self) -> &str {
            self.text
        }
        fn span(&self) -> Option<Span> {
            self.span
        }
    }

    /// Splits on spaces; words starting with a letter become `id`.
    fn toks(src: &'static str, id: &'static str) -> Vec<Tok> {
        let mut col = 0;
        src.split_whitespace()
            .map(|w| {
                let start = src[col..].find(w).unwrap_or(0) + col;
                col = start + w.len();
                let terminal = if w.starts_with(char::is_alphabetic) { id } else { w };
                Tok {
                    terminal,
                    text: w,
                    span: span!(0, start, 0, col),
                }
            })
            .collect()
    }

    /// Records what the engine showed it.
    struct Recorder;

    impl Diagnoser<Tok> for Recorder {
        type Code = (Option<std::string::String>, usize);

        fn diagnose(&self, stack: &ParseStack, _state: StateId, remaining: &[Tok]) -> Self::Code {
            (stack.top_symbol().map(Into::into), remaining.len())
        }
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn tables(g: &str, t: &str) -> (Grammar, ParseTable) {
        (Grammar::load(g).unwrap(), ParseTable::load(t).unwrap())
    }

    fn shape(node: &Node) -> std::string::String {
        if node.children.is_empty() {
            return node.label().to_string();
        }
        let inner: Vec<_> = node.children.iter().map(shape).collect();
        format!("{}[{}]", node.symbol, inner.join(", "))
    }

    #[test]
    fn builds_tree_respecting_precedence() {
        init_logger();
        let (g, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
        let mut parser = Parser::new(&g, &t);
        let tree = parser.parse(&toks("a + b * c", "id"), &GenericDiagnoser).unwrap();
        assert_eq!(
            shape(&tree.root),
            "S[E[E[T[F[a]]], +, T[T[F[b]], *, F[c]]]]"
        );
        assert_eq!(tree.root.span, span!(0, 0, 0, 9));

        let stats = parser.stats();
        assert_eq!(stats.shifts, 5);
        assert_eq!(stats.tokens, 5);
        assert_eq!(stats.reductions, 8);
    }

    #[test]
    fn leaves_replay_the_token_stream() {
        let (g, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
        let input = toks("( x + y ) * z", "id");
        let tree = Parser::new(&g, &t).parse(&input, &GenericDiagnoser).unwrap();
        let leaves: Vec<(&str, &str)> = tree
            .leaves()
            .into_iter()
            .map(|n| (n.symbol.as_str(), n.label()))
            .collect();
        let expected: Vec<(&str, &str)> = input.iter().map(|t| (t.terminal, t.text)).collect();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn explicit_end_marker_token_is_optional() {
        let (g, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
        let mut input = toks("x", "id");
        let without = Parser::new(&g, &t).parse(&input, &GenericDiagnoser).unwrap();
        input.push(Tok {
            terminal: "$",
            text: "",
            span: None,
        });
        let with = Parser::new(&g, &t).parse(&input, &GenericDiagnoser).unwrap();
        assert_eq!(without, with);
    }

    #[test]
    fn tokens_after_end_marker_are_rejected() {
        let (g, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
        let mut parser = Parser::new(&g, &t);
        let err = parser.parse(&toks("a $ b +", "id"), &Recorder).unwrap_err();
        let err = err.as_syntax().unwrap();
        assert_eq!(err.state, 3);
        assert_eq!(err.lookahead.as_str(), "id");
        assert_eq!(err.lexeme.as_deref(), Some("b"));
        assert_eq!(err.span, span!(0, 4, 0, 5));
        assert_eq!(err.code, (Some("E".into()), 2));
        assert_eq!(parser.stats().shifts, 1);
    }

    #[test]
    fn missing_action_reports_state_and_lookahead() {
        init_logger();
        let (g, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
        let err = Parser::new(&g, &t)
            .parse(&toks("a +", "id"), &Recorder)
            .unwrap_err();
        let ParseError::Syntax(err) = err else {
            panic!("expected a syntax error");
        };
        assert_eq!(err.state, 7);
        assert_eq!(err.lookahead.as_str(), "$");
        assert_eq!(err.lexeme, None);
        assert_eq!(err.code, (Some("+".into()), 0));
    }

    #[test]
    fn diagnoser_sees_remaining_tokens() {
        let (g, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
        let err = Parser::new(&g, &t)
            .parse(&toks("a b + c", "id"), &Recorder)
            .unwrap_err();
        let err = err.as_syntax().unwrap();
        assert_eq!(err.lookahead.as_str(), "id");
        assert_eq!(err.lexeme.as_deref(), Some("b"));
        assert_eq!(err.span, span!(0, 2, 0, 3));
        assert_eq!(err.state, 2);
        assert_eq!(err.code, (Some("id".into()), 3));
    }

    #[test]
    fn closures_act_as_diagnosers() {
        let (g, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
        let depth_at_failure =
            |stack: &ParseStack, state: StateId, _rest: &[Tok]| (stack.depth(), state);
        let err = Parser::new(&g, &t)
            .parse(&toks("a +", "id"), &depth_at_failure)
            .unwrap_err();
        assert_eq!(err.as_syntax().map(|e| e.code), Some((2, 7)));
    }

    #[test]
    fn epsilon_reduction_pops_nothing() {
        let (g, t) = tables(LIST_GRAMMAR, LIST_TABLE);
        let tree = Parser::new(&g, &t)
            .parse::<Tok, _>(&[], &GenericDiagnoser)
            .unwrap();
        assert_eq!(shape(&tree.root), "S[L]");
        assert!(tree.leaves().is_empty());

        let tree = Parser::new(&g, &t)
            .parse(&toks("x y", "item"), &GenericDiagnoser)
            .unwrap();
        assert_eq!(shape(&tree.root), "S[L[x, L[y, L]]]");
    }

    #[test]
    fn generic_diagnoser_reports_plain_syntax_error() {
        let (g, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
        let err = Parser::new(&g, &t)
            .parse(&toks(")", "id"), &GenericDiagnoser)
            .unwrap_err();
        assert_eq!(err.to_string(), "syntax error (state 0, lookahead `)`)");
    }

    #[test]
    fn inconsistent_tables_are_internal_errors() {
        let (_, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
        let short = Grammar::load("S -> E\nE -> E + T\n").unwrap();
        let err = Parser::new(&short, &t)
            .parse(&toks("a", "id"), &GenericDiagnoser)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Internal(InternalTableError::UnknownProduction {
                state: 2,
                production: 6
            })
        );

        let g = Grammar::load("S -> A\nA -> x\n").unwrap();
        let t = ParseTable::load(",x,$,A\n0,s1,,\n1,,r1,\n").unwrap();
        let err = Parser::new(&g, &t)
            .parse(&toks("x", "x"), &GenericDiagnoser)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Internal(InternalTableError::MissingGoto {
                state: 0,
                symbol: "A".into()
            })
        );

        let g = Grammar::load("S -> A\nA -> x y\n").unwrap();
        let t = ParseTable::load(",x,$,A\n0,r1,,\n").unwrap();
        let err = Parser::new(&g, &t)
            .parse(&toks("x", "x"), &GenericDiagnoser)
            .unwrap_err();
        assert_eq!(err, ParseError::Internal(InternalTableError::StackUnderflow));

        let t = ParseTable::load(",x,$,A\n0,,s1,\n").unwrap();
        let err = Parser::new(&g, &t)
            .parse::<Tok, _>(&[], &GenericDiagnoser)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Internal(InternalTableError::ShiftPastEnd { state: 0 })
        );

        let t = ParseTable::load(",x,$\n0,,acc\n").unwrap();
        let err = Parser::new(&Grammar::default(), &t)
            .parse::<Tok, _>(&[], &GenericDiagnoser)
            .unwrap_err();
        assert_eq!(err, ParseError::Internal(InternalTableError::EmptyGrammar));
    }

    #[test]
    fn stack_displays_alternating_states_and_symbols() {
        let mut stack = ParseStack::new();
        assert_eq!(stack.to_string(), "0");
        assert_eq!(stack.top_symbol(), None);
        stack.push("program", 1);
        stack.push("x", 3);
        assert_eq!(stack.to_string(), "0 program 1 x 3");
        assert_eq!(stack.top_state(), 3);
        assert_eq!(stack.depth(), 2);
        stack.pop(2).unwrap();
        assert_eq!(stack.states(), [0]);
        assert_eq!(stack.pop(1), Err(InternalTableError::StackUnderflow));
    }

    #[test]
    fn stats_accumulate_across_runs() {
        let (g, t) = tables(LIST_GRAMMAR, LIST_TABLE);
        let mut parser = Parser::new(&g, &t);
        parser.parse(&toks("a b", "item"), &GenericDiagnoser).unwrap();
        parser.parse(&toks("c", "item"), &GenericDiagnoser).unwrap();
        let mut total = ParserStats::default();
        total += parser.stats();
        assert_eq!(total.shifts, 3);
        assert_eq!(total.reductions, 5);
    }

    proptest::proptest! {
        #[test]
        fn leaves_replay_shifted_tokens(
            first in 0usize..3,
            rest in proptest::collection::vec((0usize..2, 0usize..3), 0..12)
        ) {
            const IDS: [&str; 3] = ["a", "b", "c"];
            const OPS: [&str; 2] = ["+", "*"];
            let mk = |terminal, text| Tok { terminal, text, span: None };
            let mut input = vec![mk("id", IDS[first])];
            for (op, id) in rest {
                input.push(mk(OPS[op], OPS[op]));
                input.push(mk("id", IDS[id]));
            }

            let (g, t) = tables(EXPR_GRAMMAR, EXPR_TABLE);
            let mut parser = Parser::new(&g, &t);
            let tree = parser.parse(&input, &GenericDiagnoser).unwrap();
            let leaves: Vec<&str> = tree.leaves().into_iter().map(Node::label).collect();
            let texts: Vec<&str> = input.iter().map(|t| t.text).collect();
            proptest::prop_assert_eq!(leaves, texts);
            proptest::prop_assert_eq!(parser.stats().shifts, input.len());
        }
    }
}
