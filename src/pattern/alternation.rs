//! Turning a flat parsed sequence into a chain of alternation nodes.
//!
//! The parser collects each sequence (the top level, or the inside of a
//! group or lookaround) as a flat list of [`Item`]s and hands it here when
//! the sequence closes. Inner sequences are restructured before the outer
//! one is even finished, so nested scopes never see each other's `|`.
//!
//! The first pass makes the list well-formed: every `|` gets an operand on
//! both sides (an [`Op::Empty`] is inserted where one is missing) and every
//! quantifier is folded into a [`Op::Repeat`] around the atom before it.
//! The second pass cuts the list at each `|`: the run of atoms since the
//! previous marker becomes the child of a new [`Op::Or`] node, so `a|b|c`
//! becomes the sibling chain `Or(a) -> Or(b) -> c`.

use super::ast::{Arena, NodeId, Op};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Item {
    Atom(NodeId),
    /// An alternation marker.
    Bar,
    Quantifier {
        min: u32,
        max: Option<u32>,
        lazy: bool,
    },
}

/// Restructure one sequence and return the head of its sibling chain.
///
/// An empty sequence becomes a single empty node.
pub(crate) fn restructure(arena: &mut Arena, items: Vec<Item>) -> NodeId {
    let padded = pad(arena, items);
    split(arena, padded)
}

/// First pass: insert empty operands and bind quantifiers.
fn pad(arena: &mut Arena, items: Vec<Item>) -> Vec<Item> {
    let mut out: Vec<Item> = Vec::with_capacity(items.len() + 2);
    for item in items {
        match item {
            Item::Atom(_) => out.push(item),
            Item::Bar => {
                if !matches!(out.last(), Some(Item::Atom(_))) {
                    out.push(Item::Atom(arena.alloc(Op::Empty)));
                }
                out.push(Item::Bar);
            }
            Item::Quantifier { min, max, lazy } => {
                let atom = match out.last() {
                    Some(&Item::Atom(id)) => {
                        out.pop();
                        id
                    }
                    _ => arena.alloc(Op::Empty),
                };
                let repeat = arena.alloc(Op::Repeat {
                    atom,
                    min,
                    max,
                    lazy,
                });
                arena.adopt(atom, repeat);
                out.push(Item::Atom(repeat));
            }
        }
    }
    if !matches!(out.last(), Some(Item::Atom(_))) {
        out.push(Item::Atom(arena.alloc(Op::Empty)));
    }
    out
}

/// Second pass: hang each alternative under an `Or` node.
fn split(arena: &mut Arena, items: Vec<Item>) -> NodeId {
    let mut chain = Vec::new();
    let mut run = Vec::new();
    for item in items {
        match item {
            Item::Atom(id) => run.push(id),
            Item::Bar => {
                let Some(left) = arena.link(&run) else {
                    continue;
                };
                let or = arena.alloc(Op::Or { left });
                arena.adopt(left, or);
                chain.push(or);
                run.clear();
            }
            Item::Quantifier { .. } => unreachable!("quantifiers are bound by pad"),
        }
    }
    chain.append(&mut run);
    match arena.link(&chain) {
        Some(head) => head,
        None => arena.alloc(Op::Empty),
    }
}
