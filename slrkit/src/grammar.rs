//! Grammar model loaded from `LHS -> s1 s2 ... sn` text.
//!
//! One production per line. Blank lines and `--` comment lines are skipped and
//! do not take an index, so production `i` is the `i`-th remaining line. An
//! empty right-hand side (`A ->`) is an epsilon production. Reduce actions in a
//! [`ParseTable`](crate::ParseTable) refer to productions by this index.
//!
//! # Examples
//!
//! ```rust
//! # use slrkit::Grammar;
//! let grammar: Grammar = "S -> E\nE -> E + T\nE -> T\n".parse().unwrap();
//! assert_eq!(grammar.len(), 3);
//! assert_eq!(grammar.start_symbol(), Some("S"));
//! assert_eq!(grammar.production(1).unwrap().to_string(), "E -> E + T");
//! ```
use crate::ProdId;
use crate::error::{GrammarErrorKind, GrammarFormatError};
use smartstring::alias::String;
use std::fmt;
use std::str::FromStr;

const ARROW: &str = "->";
const COMMENT: &str = "--";

/// A single grammar rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub lhs: String,
    pub rhs: Vec<String>,
}

impl Production {
    pub fn new<I, S>(lhs: &str, rhs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into_iter().map(|s| String::from(s.as_ref())).collect(),
        }
    }

    /// Number of right-hand side symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    #[inline]
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.lhs, ARROW)?;
        for sym in &self.rhs {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}

/// An ordered list of productions; index 0 is the augmented start production.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
    productions: Vec<Production>,
}

impl Grammar {
    /// Parses grammar text. Fails on the first malformed line.
    pub fn load(text: &str) -> Result<Self, GrammarFormatError> {
        let mut productions = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(COMMENT) {
                continue;
            }
            let production =
                parse_line(line).map_err(|kind| GrammarFormatError { line: i + 1, kind })?;
            productions.push(production);
        }
        log::debug!("loaded grammar: {} productions", productions.len());
        Ok(Self { productions })
    }

    pub fn from_productions(productions: Vec<Production>) -> Self {
        Self { productions }
    }

    #[inline]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    #[inline]
    pub fn production(&self, id: ProdId) -> Option<&Production> {
        self.productions.get(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.productions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// LHS of production 0.
    pub fn start_symbol(&self) -> Option<&str> {
        self.productions.first().map(|p| p.lhs.as_str())
    }

    /// Distinct left-hand sides in order of first appearance.
    pub fn nonterminals(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for p in &self.productions {
            if !out.contains(&p.lhs.as_str()) {
                out.push(p.lhs.as_str());
            }
        }
        out
    }
}

fn parse_line(line: &str) -> Result<Production, GrammarErrorKind> {
    let mut parts = line.split(ARROW);
    let lhs = parts.next().unwrap_or_default().trim();
    let Some(rhs) = parts.next() else {
        return Err(GrammarErrorKind::MissingArrow);
    };
    if parts.next().is_some() {
        return Err(GrammarErrorKind::ExtraArrow);
    }
    if lhs.is_empty() {
        return Err(GrammarErrorKind::EmptyLhs);
    }
    if lhs.split_whitespace().nth(1).is_some() {
        return Err(GrammarErrorKind::CompoundLhs(lhs.into()));
    }
    Ok(Production::new(lhs, rhs.split_whitespace()))
}

impl FromStr for Grammar {
    type Err = GrammarFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::load(s)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.productions.iter().enumerate() {
            writeln!(f, "{}. {}", i, p)?;
        }
        Ok(())
    }
}
