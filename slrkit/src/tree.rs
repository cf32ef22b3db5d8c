//! Concrete parse trees built by the engine.
//!
//! Leaves are shifted tokens and carry their lexeme; interior nodes are
//! reductions and carry the production's left-hand side. Each node owns its
//! children outright.
use crate::Span;
use smartstring::alias::String;
use std::fmt;

const INDENT: usize = 3;

/// A node of the parse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Terminal or nonterminal name.
    pub symbol: String,
    /// Source text for token leaves, `None` for interior nodes.
    pub lexeme: Option<String>,
    pub span: Option<Span>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(symbol: &str, lexeme: &str, span: Option<Span>) -> Self {
        Self {
            symbol: symbol.into(),
            lexeme: Some(lexeme.into()),
            span,
            children: Vec::new(),
        }
    }

    /// Interior node; its span covers the children's spans.
    pub fn branch(symbol: &str, children: Vec<Node>) -> Self {
        let span = children
            .iter()
            .fold(None, |acc, child| Span::merge_opt(acc, child.span));
        Self {
            symbol: symbol.into(),
            lexeme: None,
            span,
            children,
        }
    }

    /// The lexeme for token leaves, otherwise the symbol.
    pub fn label(&self) -> &str {
        self.lexeme.as_deref().unwrap_or(&self.symbol)
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.lexeme.is_some()
    }

    /// Token leaves, left to right.
    pub fn leaves(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Node>) {
        if self.is_leaf() {
            out.push(self);
        }
        for child in &self.children {
            child.collect_leaves(out);
        }
    }

    /// First node (pre-order) whose symbol is `symbol`.
    pub fn find(&self, symbol: &str) -> Option<&Node> {
        if self.symbol.as_str() == symbol {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(symbol))
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:width$}{}", "", self.label(), width = depth * INDENT)?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// The result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    pub root: Node,
}

impl ParseTree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn leaves(&self) -> Vec<&Node> {
        self.root.leaves()
    }

    pub fn find(&self, symbol: &str) -> Option<&Node> {
        self.root.find(symbol)
    }

    pub fn into_root(self) -> Node {
        self.root
    }
}

/// One label per line, indented three spaces per level.
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_indented(f, 0)
    }
}
