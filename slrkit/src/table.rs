//! SLR(1) action and goto tables loaded from comma-separated text.
//!
//! The header row is `<ignored>,<terminals...>,$,<nonterminals...>`: the `$`
//! column closes the terminal (action) columns and everything after it is a
//! goto column. Each data row is `<state>,<cells...>` where an action cell is
//! `s<state>`, `r<production>`, `acc` or empty, and a goto cell is a state
//! number or empty.
//!
//! Both tables are stored densely, one row per state, with [`Action::Error`]
//! and `None` marking missing entries.
//!
//! # Examples
//!
//! ```rust
//! # use slrkit::{Action, ParseTable};
//! let table = ParseTable::load(",item,$,L\n0,s1,r2,2\n1,s1,r2,3\n2,,acc,\n3,,r1,\n").unwrap();
//! assert_eq!(table.state_count(), 4);
//! assert_eq!(table.action(0, "item"), Action::Shift(1));
//! assert_eq!(table.action(2, "$"), Action::Accept);
//! assert_eq!(table.action(2, "item"), Action::Error);
//! assert_eq!(table.goto(1, "L"), Some(3));
//! ```
use crate::error::{TableErrorKind, TableFormatError};
use crate::{ProdId, StateId};
use smartstring::alias::String;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// End-of-input terminal name.
pub const END_MARKER: &str = "$";

const ACCEPT: &str = "acc";

/// State ids may exceed twice the number of data rows by at most this much.
const STATE_SLACK: usize = 16;

/// An entry of the action table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// No entry; the engine reports a syntax error.
    #[default]
    Error,
    Accept,
    Shift(StateId),
    Reduce(ProdId),
}

impl Action {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Action::Error)
    }

    /// Parses an action cell. `None` if the text is not a valid cell.
    fn parse_cell(cell: &str) -> Option<Action> {
        if cell.is_empty() {
            return Some(Action::Error);
        }
        if cell == ACCEPT {
            return Some(Action::Accept);
        }
        if let Some(n) = cell.strip_prefix('s') {
            return n.parse().ok().map(Action::Shift);
        }
        if let Some(n) = cell.strip_prefix('r') {
            return n.parse().ok().map(Action::Reduce);
        }
        None
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Error => Ok(()),
            Action::Accept => f.write_str(ACCEPT),
            Action::Shift(s) => write!(f, "s{}", s),
            Action::Reduce(p) => write!(f, "r{}", p),
        }
    }
}

/// Column names interned in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Columns {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Columns {
    fn add(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.index.insert(name.into(), self.names.len());
        self.names.push(name.into());
        true
    }

    #[inline]
    fn idx(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[inline]
    fn len(&self) -> usize {
        self.names.len()
    }
}

/// Dense SLR(1) action/goto tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseTable {
    terminals: Columns,
    nonterminals: Columns,
    actions: Vec<Action>,
    gotos: Vec<Option<StateId>>,
    states: usize,
}

impl ParseTable {
    /// Parses table text. Fails on the first malformed row.
    ///
    /// A state id that appears twice is logged and the later row replaces
    /// the earlier one. State ids above twice the row count plus a small
    /// slack are rejected as [`TableErrorKind::BadState`].
    pub fn load(text: &str) -> Result<Self, TableFormatError> {
        let rows: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !line.trim().is_empty())
            .collect();

        let Some((&(header_row, header), data)) = rows.split_first() else {
            return Err(TableFormatError {
                row: 1,
                kind: TableErrorKind::Empty,
            });
        };
        let mut table = Self::from_header(header).map_err(|kind| TableFormatError {
            row: header_row,
            kind,
        })?;

        let max_state = data.len().saturating_mul(2).saturating_add(STATE_SLACK);
        let mut seen = Vec::new();
        for &(row, line) in data {
            let state = table
                .load_row(line, max_state)
                .map_err(|kind| TableFormatError { row, kind })?;
            if seen.len() <= state {
                seen.resize(state + 1, false);
            }
            if seen[state] {
                log::warn!("table row {}: state {} repeats, later row wins", row, state);
            }
            seen[state] = true;
        }

        log::debug!(
            "loaded table: {} states, {} terminals, {} nonterminals",
            table.states,
            table.terminals.len(),
            table.nonterminals.len()
        );
        Ok(table)
    }

    fn from_header(header: &str) -> Result<Self, TableErrorKind> {
        let columns: Vec<&str> = header.split(',').skip(1).map(str::trim).collect();
        let end = columns
            .iter()
            .position(|c| *c == END_MARKER)
            .ok_or(TableErrorKind::MissingEndMarker)?;

        let mut table = Self::default();
        for (i, name) in columns.iter().enumerate() {
            let added = if i <= end {
                table.terminals.add(name)
            } else {
                table.nonterminals.add(name)
            };
            if !added || (i > end && table.terminals.idx(name).is_some()) {
                return Err(TableErrorKind::DuplicateColumn((*name).into()));
            }
        }
        Ok(table)
    }

    fn load_row(&mut self, line: &str, max_state: StateId) -> Result<StateId, TableErrorKind> {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        let expected = 1 + self.terminals.len() + self.nonterminals.len();
        if cells.len() != expected {
            return Err(TableErrorKind::Arity {
                expected,
                found: cells.len(),
            });
        }

        let state = cells[0]
            .parse::<StateId>()
            .ok()
            .filter(|&s| s <= max_state)
            .ok_or_else(|| TableErrorKind::BadState(cells[0].into()))?;
        self.ensure_state(state);

        let (action_cells, goto_cells) = cells[1..].split_at(self.terminals.len());
        let nt = self.terminals.len();
        for (col, cell) in action_cells.iter().enumerate() {
            let action = Action::parse_cell(cell).ok_or_else(|| TableErrorKind::BadCell {
                column: self.terminals.names[col].clone(),
                cell: (*cell).into(),
            })?;
            self.actions[state * nt + col] = action;
        }

        let nn = self.nonterminals.len();
        for (col, cell) in goto_cells.iter().enumerate() {
            let target = if cell.is_empty() {
                None
            } else {
                Some(cell.parse::<StateId>().map_err(|_| TableErrorKind::BadCell {
                    column: self.nonterminals.names[col].clone(),
                    cell: (*cell).into(),
                })?)
            };
            self.gotos[state * nn + col] = target;
        }
        Ok(state)
    }

    fn ensure_state(&mut self, state: StateId) {
        if state >= self.states {
            self.states = state + 1;
            self.actions
                .resize(self.states * self.terminals.len(), Action::Error);
            self.gotos.resize(self.states * self.nonterminals.len(), None);
        }
    }

    /// Action for `(state, terminal)`; [`Action::Error`] when there is none.
    pub fn action(&self, state: StateId, terminal: &str) -> Action {
        match self.terminals.idx(terminal) {
            Some(col) if state < self.states => self.actions[state * self.terminals.len() + col],
            _ => Action::Error,
        }
    }

    /// Goto target for `(state, nonterminal)`.
    pub fn goto(&self, state: StateId, nonterminal: &str) -> Option<StateId> {
        match self.nonterminals.idx(nonterminal) {
            Some(col) if state < self.states => {
                self.gotos[state * self.nonterminals.len() + col]
            }
            _ => None,
        }
    }

    /// Terminals that have an action in `state`, in header order.
    pub fn expected(&self, state: StateId) -> Vec<&str> {
        self.terminals
            .names
            .iter()
            .filter(|t| !self.action(state, t.as_str()).is_error())
            .map(|t| t.as_str())
            .collect()
    }

    /// Terminal column names, `$` last.
    pub fn terminals(&self) -> impl Iterator<Item = &str> {
        self.terminals.names.iter().map(|s| s.as_str())
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.nonterminals.names.iter().map(|s| s.as_str())
    }

    /// One past the highest state id seen.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.states
    }
}

impl FromStr for ParseTable {
    type Err = TableFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::load(s)
    }
}

impl fmt::Display for ParseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in 0..self.states {
            write!(f, "{}:", state)?;
            for t in self.terminals() {
                let action = self.action(state, t);
                if !action.is_error() {
                    write!(f, " {}={}", t, action)?;
                }
            }
            for nt in self.nonterminals() {
                if let Some(target) = self.goto(state, nt) {
                    write!(f, " {}->{}", nt, target)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPR: &str = ",+,*,(,),id,$,E,T,F
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

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn loads_actions_and_gotos() {
        init_logger();
        let t = ParseTable::load(EXPR).unwrap();
        assert_eq!(t.state_count(), 12);
        assert_eq!(t.terminals().collect::<Vec<_>>(), ["+", "*", "(", ")", "id", "$"]);
        assert_eq!(t.nonterminals().collect::<Vec<_>>(), ["E", "T", "F"]);

        assert_eq!(t.action(0, "("), Action::Shift(1));
        assert_eq!(t.action(2, "+"), Action::Reduce(6));
        assert_eq!(t.action(3, "$"), Action::Accept);
        assert_eq!(t.action(0, "+"), Action::Error);
        assert_eq!(t.goto(7, "T"), Some(10));
        assert_eq!(t.goto(7, "E"), None);
    }

    #[test]
    fn unknown_symbols_and_states_are_absent() {
        let t = ParseTable::load(EXPR).unwrap();
        assert_eq!(t.action(0, "nope"), Action::Error);
        assert_eq!(t.action(99, "id"), Action::Error);
        assert_eq!(t.action(0, "E"), Action::Error);
        assert_eq!(t.goto(0, "id"), None);
        assert_eq!(t.goto(99, "E"), None);
    }

    #[test]
    fn expected_lists_terminals_with_actions() {
        let t = ParseTable::load(EXPR).unwrap();
        assert_eq!(t.expected(0), ["(", "id"]);
        assert_eq!(t.expected(3), ["+", "$"]);
        assert!(t.expected(42).is_empty());
    }

    #[test]
    fn missing_rows_have_no_actions() {
        let t = ParseTable::load(",a,$\n3,acc,\n").unwrap();
        assert_eq!(t.state_count(), 4);
        assert_eq!(t.action(3, "a"), Action::Accept);
        assert!(t.expected(0).is_empty());
    }

    #[test]
    fn repeated_state_keeps_last_row() {
        init_logger();
        let t = ParseTable::load(",a,$,A\n0,s1,,1\n0,,acc,\n").unwrap();
        assert_eq!(t.action(0, "a"), Action::Error);
        assert_eq!(t.action(0, "$"), Action::Accept);
        assert_eq!(t.goto(0, "A"), None);
    }

    #[test]
    fn format_errors_name_the_row() {
        let err = ParseTable::load("").unwrap_err();
        assert_eq!(err.kind, TableErrorKind::Empty);

        let err = ParseTable::load("\n,a,b,A\n").unwrap_err();
        assert_eq!(
            err,
            TableFormatError {
                row: 2,
                kind: TableErrorKind::MissingEndMarker
            }
        );

        let err = ParseTable::load(",a,$,a\n").unwrap_err();
        assert_eq!(err.kind, TableErrorKind::DuplicateColumn("a".into()));

        let err = ParseTable::load(",a,$,A\n0,s1,,\n1,s1,\n").unwrap_err();
        assert_eq!(
            err,
            TableFormatError {
                row: 3,
                kind: TableErrorKind::Arity {
                    expected: 4,
                    found: 3
                }
            }
        );

        let err = ParseTable::load(",a,$\nx,,\n").unwrap_err();
        assert_eq!(err.kind, TableErrorKind::BadState("x".into()));

        let err = ParseTable::load(",a,$\n0,q1,\n").unwrap_err();
        assert_eq!(
            err.kind,
            TableErrorKind::BadCell {
                column: "a".into(),
                cell: "q1".into()
            }
        );

        let err = ParseTable::load(",a,$,A\n0,,,x\n").unwrap_err();
        assert_eq!(
            err.kind,
            TableErrorKind::BadCell {
                column: "A".into(),
                cell: "x".into()
            }
        );
    }

    #[test]
    fn oversized_state_ids_are_rejected() {
        for id in ["18446744073709551615", "4611686018427387904", "19"] {
            let err = ParseTable::load(&format!(",a,$\n{id},,\n")).unwrap_err();
            assert_eq!(
                err,
                TableFormatError {
                    row: 2,
                    kind: TableErrorKind::BadState(id.into())
                }
            );
        }
        let t = ParseTable::load(",a,$\n18,acc,\n").unwrap();
        assert_eq!(t.state_count(), 19);
    }

    #[test]
    fn crlf_rows_are_accepted() {
        let t = ParseTable::load(",a,$,A\r\n0,s1,,2\r\n1,,acc,\r\n").unwrap();
        assert_eq!(t.goto(0, "A"), Some(2));
        assert_eq!(t.action(1, "$"), Action::Accept);
    }

    #[test]
    fn action_cells_display_as_written() {
        assert_eq!(Action::Shift(7).to_string(), "s7");
        assert_eq!(Action::Reduce(0).to_string(), "r0");
        assert_eq!(Action::Accept.to_string(), "acc");
        assert_eq!(Action::Error.to_string(), "");
        assert_eq!(Action::parse_cell("s12"), Some(Action::Shift(12)));
        assert_eq!(Action::parse_cell("r"), None);
    }

    #[test]
    fn display_lists_entries_per_state() {
        let t = ParseTable::load(",item,$,L\n0,s1,r2,2\n1,s1,r2,3\n2,,acc,\n3,,r1,\n").unwrap();
        assert_eq!(
            t.to_string(),
            "0: item=s1 $=r2 L->2\n1: item=s1 $=r2 L->3\n2: $=acc\n3: $=r1\n"
        );
    }

    #[test]
    fn loading_is_idempotent() {
        assert_eq!(
            ParseTable::load(EXPR).unwrap(),
            EXPR.parse::<ParseTable>().unwrap()
        );
    }
}
