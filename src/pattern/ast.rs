//! Operation tree for compiled Colorer patterns.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. A
//! sequence is a sibling chain (`next`/`prev`); containers (groups,
//! lookarounds, quantifiers, alternation markers) point at the first node
//! of their child chain, and every child points back at its container via
//! `parent`.

use std::fmt::Write as _;

use super::captures::NamedGroupTable;
use super::char_class::CharClass;
use super::parser::CompileOptions;

/// Index of a node in [`CompiledPattern::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub op: Op,
    pub parent: Option<NodeId>,
    pub next: Option<NodeId>,
    pub prev: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub enum Op {
    /// Matches the empty string.
    Empty,
    Literal(u16),
    Meta(MetaSymbol),
    Class {
        set: Box<CharClass>,
        negated: bool,
    },
    Group {
        body: NodeId,
        capture: Capture,
    },
    Look {
        body: NodeId,
        kind: Lookaround,
    },
    /// One alternative as a child; the remaining alternatives follow as
    /// siblings.
    Or {
        left: NodeId,
    },
    Repeat {
        atom: NodeId,
        min: u32,
        /// `None` is unbounded.
        max: Option<u32>,
        lazy: bool,
    },
    BackRef(u8),
    NamedBackRef(u8),
    CrossRef {
        target: CrossTarget,
        ignore_case: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaSymbol {
    /// `.`
    AnyChar,
    /// `^` under multiline.
    LineStart,
    /// `~`, and `^` outside multiline.
    SchemeStart,
    /// `$`
    LineEnd,
    Digit,
    NotDigit,
    Word,
    NotWord,
    Space,
    NotSpace,
    Upper,
    Lower,
    WordBoundary,
    NotWordBoundary,
    /// `\c`: preceded by a non-letter (or at either edge of the input).
    PrecededByNonLetter,
    /// `\m`: pins the start of the whole match.
    MatchStart,
    /// `\M`: pins the end of the whole match.
    MatchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    None,
    Numbered(u8),
    Named(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookaround {
    Ahead,
    NotAhead,
    Behind(usize),
    NotBehind(usize),
}

/// Slot referenced by `\y`/`\Y` in the attached back-reference source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossTarget {
    Numbered(u8),
    Named(u8),
    /// Name not defined in this pattern; resolved against the attached
    /// name table at match time.
    Unresolved(String),
}

/// O(1) test the scanning loop applies before entering the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefilter {
    None,
    Literal { unit: u16, ignore_case: bool },
    Anchor(MetaSymbol),
}

/// A pattern ready for matching. Immutable once built.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) names: NamedGroupTable,
    pub(crate) options: CompileOptions,
    pub(crate) prefilter: Prefilter,
}

impl CompiledPattern {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn names(&self) -> &NamedGroupTable {
        &self.names
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    pub fn prefilter(&self) -> Prefilter {
        self.prefilter
    }

    /// Iterate a sibling chain starting at `first`.
    pub fn siblings(&self, first: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(first), |&id| self.node(id).next)
    }

    /// Render the tree as indented text, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_chain(&mut out, self.root, 0);
        out
    }

    fn dump_chain(&self, out: &mut String, first: NodeId, depth: usize) {
        for id in self.siblings(first) {
            let _ = write!(out, "{:indent$}", "", indent = depth * 2);
            match &self.node(id).op {
                Op::Empty => out.push_str("empty\n"),
                Op::Literal(c) => match char::from_u32(u32::from(*c)) {
                    Some(ch) if !ch.is_control() => {
                        let _ = writeln!(out, "lit {ch:?}");
                    }
                    _ => {
                        let _ = writeln!(out, "lit {c:#06x}");
                    }
                },
                Op::Meta(m) => {
                    let _ = writeln!(out, "meta {m:?}");
                }
                Op::Class { set, negated } => {
                    let neg = if *negated { "^" } else { "" };
                    let _ = writeln!(out, "class {neg}[{} units]", set.len());
                }
                Op::Group { body, capture } => {
                    match capture {
                        Capture::None => out.push_str("group\n"),
                        Capture::Numbered(n) => {
                            let _ = writeln!(out, "group #{n}");
                        }
                        Capture::Named(n) => {
                            let name = self.names.name(*n).unwrap_or_default();
                            let _ = writeln!(out, "group {{{name}}}");
                        }
                    }
                    self.dump_chain(out, *body, depth + 1);
                }
                Op::Look { body, kind } => {
                    let _ = writeln!(out, "look {kind:?}");
                    self.dump_chain(out, *body, depth + 1);
                }
                Op::Or { left } => {
                    out.push_str("or\n");
                    self.dump_chain(out, *left, depth + 1);
                }
                Op::Repeat {
                    atom,
                    min,
                    max,
                    lazy,
                } => {
                    let max = max.map_or_else(|| "inf".to_string(), |m| m.to_string());
                    let lazy = if *lazy { " lazy" } else { "" };
                    let _ = writeln!(out, "repeat {min}..{max}{lazy}");
                    self.dump_chain(out, *atom, depth + 1);
                }
                Op::BackRef(n) => {
                    let _ = writeln!(out, "backref #{n}");
                }
                Op::NamedBackRef(n) => {
                    let name = self.names.name(*n).unwrap_or_default();
                    let _ = writeln!(out, "backref {{{name}}}");
                }
                Op::CrossRef {
                    target,
                    ignore_case,
                } => {
                    let tag = if *ignore_case { "Y" } else { "y" };
                    match target {
                        CrossTarget::Numbered(n) => {
                            let _ = writeln!(out, "crossref {tag} #{n}");
                        }
                        CrossTarget::Named(n) => {
                            let name = self.names.name(*n).unwrap_or_default();
                            let _ = writeln!(out, "crossref {tag} {{{name}}}");
                        }
                        CrossTarget::Unresolved(name) => {
                            let _ = writeln!(out, "crossref {tag} {{{name}}}?");
                        }
                    }
                }
            }
        }
    }
}

/// Node storage used while a pattern is being built.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn alloc(&mut self, op: Op) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            op,
            parent: None,
            next: None,
            prev: None,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Chain `ids` as siblings and return the first, or `None` if empty.
    pub fn link(&mut self, ids: &[NodeId]) -> Option<NodeId> {
        for pair in ids.windows(2) {
            self.node_mut(pair[0]).next = Some(pair[1]);
            self.node_mut(pair[1]).prev = Some(pair[0]);
        }
        if let Some(&last) = ids.last() {
            self.node_mut(last).next = None;
        }
        if let Some(&first) = ids.first() {
            self.node_mut(first).prev = None;
        }
        ids.first().copied()
    }

    /// Make `parent` the container of the whole chain starting at `first`.
    pub fn adopt(&mut self, first: NodeId, parent: NodeId) {
        let mut cur = Some(first);
        while let Some(id) = cur {
            let node = self.node_mut(id);
            node.parent = Some(parent);
            cur = node.next;
        }
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
