//! Skip/count edge matcher
//!
//! Descends from a node along a sequence of text fragments, comparing tree
//! edges against fragments by *length* rather than byte by byte. A whole
//! edge is consumed in one step, so no byte is ever re-compared; this is
//! what keeps total matching work over an entire construction linear.
//!
//! Only the builder calls this. The fragments it passes are bytes known to
//! be present in the tree (they were inserted by earlier extensions), so a
//! missing child here means the algorithm itself is broken, and we panic
//! with the offending node and text index rather than return an error.

use super::types::{EdgeLabel, NodeArena, NodeId};

/// Where a descent stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Descent {
    /// Matching consumed the fragments exactly at this node
    AtNode(NodeId),
    /// Matching stopped inside the incoming edge of `node`;
    /// `unmatched_at` is the absolute text index of the first unmatched byte
    InEdge { node: NodeId, unmatched_at: usize },
}

impl Descent {
    #[cfg(test)]
    pub(crate) fn node(&self) -> NodeId {
        match *self {
            Descent::AtNode(n) => n,
            Descent::InEdge { node, .. } => node,
        }
    }
}

/// Follow `fragments` downward from `start`.
///
/// `fragments` must be non-empty and each fragment non-empty; open tree
/// edges are measured against `phase`.
pub(crate) fn descend(
    arena: &NodeArena,
    text: &[u8],
    phase: usize,
    start: NodeId,
    fragments: &[EdgeLabel],
) -> Descent {
    assert!(!fragments.is_empty(), "descend requires at least one fragment");

    let mut frag_idx = 0;
    let mut cursor = fragments[0].start;
    let mut frag_end = fragments[0].end_index(phase);

    let mut node = start;
    let mut child = step(arena, text, node, cursor);
    let mut edge_len = edge_len_of(arena, child, phase);

    loop {
        // Bytes of the current fragment still to match against this edge
        let remaining = frag_end + 1 - cursor;

        if remaining > edge_len {
            // Edge shorter than the fragment remainder: consume it whole
            cursor += edge_len;
        } else {
            frag_idx += 1;
            if frag_idx < fragments.len() {
                cursor = fragments[frag_idx].start;
                frag_end = fragments[frag_idx].end_index(phase);
            } else if remaining < edge_len {
                // Fragments exhausted strictly inside this edge
                let edge = arena.get(child).edge.expect("non-root node has an edge");
                let unmatched_at = edge.end_index(phase) - (edge_len - remaining) + 1;
                return Descent::InEdge {
                    node: child,
                    unmatched_at,
                };
            } else {
                return Descent::AtNode(child);
            }
        }

        if remaining >= edge_len {
            node = child;
            child = step(arena, text, node, cursor);
            edge_len = edge_len_of(arena, child, phase);
        }
    }
}

fn edge_len_of(arena: &NodeArena, id: NodeId, phase: usize) -> usize {
    arena
        .get(id)
        .edge
        .expect("non-root node has an edge")
        .len_at(phase)
}

fn step(arena: &NodeArena, text: &[u8], node: NodeId, cursor: usize) -> NodeId {
    let byte = text[cursor];
    match arena.child(node, byte) {
        Some(child) => child,
        None => panic!(
            "suffix tree invariant broken: node {} has no child for byte {:#04x} (text index {})",
            node, byte, cursor
        ),
    }
}
