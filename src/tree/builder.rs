//! Ukkonen's online suffix tree construction
//!
//! Builds the tree in a single left-to-right pass over the text, one phase
//! per position. Linear time rests on three devices working together:
//!
//! 1. The skip/count matcher ([`super::matcher`]) traverses long edges in
//!    one step instead of byte by byte.
//! 2. Suffix links let each extension locate its insertion point from the
//!    previous extension's endpoint in amortized O(1), walking up at most
//!    two ancestors ("canonical reference") instead of restarting at root.
//! 3. Each phase starts its extensions at the last created leaf: earlier
//!    suffixes are guaranteed already present, and a "rule 3" hit stops the
//!    phase outright because all remaining suffixes are implicitly present.
//!
//! The loop is a faithful rendition of a subtle algorithm; structural
//! assumptions that cannot be violated by any input (a child that must
//! exist, at most one unlinked ancestor) are enforced with panics, not
//! errors.

use super::matcher::{descend, Descent};
use super::types::{EdgeLabel, Node, NodeArena, NodeId, ROOT};

/// Single-use construction state; `build` consumes it and yields the
/// finished text/arena pair.
pub(crate) struct TreeBuilder {
    text: Vec<u8>,
    arena: NodeArena,
    /// Current phase: index of the text position being inserted. Open
    /// edges are measured against this, so none are ever rewritten
    /// per-phase.
    phase: usize,
}

/// Where the canonical jump lands before re-matching.
enum Jump {
    /// No usable link above: fall back to matching down from the root
    FromRoot,
    /// The previous endpoint already carries a link; land there directly
    Direct(NodeId),
    /// Land on an ancestor's link target, then re-match the one or two
    /// edge fragments between that ancestor and the previous endpoint
    Rematch {
        target: NodeId,
        fragments: Vec<EdgeLabel>,
    },
}

impl TreeBuilder {
    /// Caller guarantees `text` is non-empty.
    pub(crate) fn new(text: Vec<u8>) -> Self {
        debug_assert!(!text.is_empty());
        Self {
            text,
            arena: NodeArena::with_root(),
            phase: 0,
        }
    }

    pub(crate) fn build(mut self) -> (Vec<u8>, NodeArena) {
        let m = self.text.len();

        // Implicit phase 0: root with one open edge to leaf 0
        let deep = self.add_edge(ROOT, EdgeLabel::open(0));
        self.set_leaf(deep, 0);

        let mut prev_ext_end = deep;
        let mut last_created_leaf: Option<usize> = None;

        for i in 1..m {
            self.phase = i;

            let mut skip_remaining = false;
            let mut pending_link: Option<NodeId> = None;

            // Extensions 1..j_start-1 are already present from earlier phases
            let j_start = last_created_leaf.unwrap_or(1);
            let mut j = j_start;

            while j < i {
                let outcome = self.locate(prev_ext_end, last_created_leaf, j, i);

                match outcome {
                    Descent::InEdge { node: found, unmatched_at } => {
                        if self.text[unmatched_at] == self.text[i] {
                            // Rule 3: suffix already implicitly present;
                            // the phase stops here
                            skip_remaining = true;
                            break;
                        }
                        // Rule 2a: split the edge at the mismatch
                        let internal = self.split_edge(found, unmatched_at);
                        if let Some(p) = pending_link.take() {
                            self.set_link(p, internal);
                        }
                        pending_link = Some(internal);

                        let leaf = self.add_edge(internal, EdgeLabel::open(i));
                        self.set_leaf(leaf, j);
                        last_created_leaf = Some(j);
                        prev_ext_end = internal;
                    }
                    Descent::AtNode(found) => {
                        if self.arena.get(found).is_leaf() {
                            // Rule 1: the leaf keeps growing by itself
                            prev_ext_end = found;
                        } else {
                            if let Some(p) = pending_link.take() {
                                self.set_link(p, found);
                            }
                            if self.arena.get(found).link.is_none() {
                                pending_link = Some(found);
                            }

                            if self.arena.child(found, self.text[i]).is_none() {
                                // Rule 2b: attach a new leaf directly
                                let leaf = self.add_edge(found, EdgeLabel::open(i));
                                self.set_leaf(leaf, j);
                                last_created_leaf = Some(j);
                                prev_ext_end = found;
                            } else {
                                // Rule 3 at a node boundary
                                skip_remaining = true;
                                break;
                            }
                        }
                    }
                }

                j += 1;
            }

            if !skip_remaining {
                // Extension j = i is always handled against the root
                if self.arena.child(ROOT, self.text[i]).is_none() {
                    let leaf = self.add_edge(ROOT, EdgeLabel::open(i));
                    self.set_leaf(leaf, i);
                    last_created_leaf = Some(i);
                    prev_ext_end = leaf;
                }
                // Root is always a valid link target
                if let Some(p) = pending_link.take() {
                    self.set_link(p, ROOT);
                }
            }
        }

        self.close_leaves(m - 1);
        (self.text, self.arena)
    }

    /// Locate the active point for extension `j` of phase `i`.
    fn locate(
        &self,
        prev_ext_end: NodeId,
        last_created_leaf: Option<usize>,
        j: usize,
        i: usize,
    ) -> Descent {
        // Continuation of the previous phase's last extension: only the
        // newest byte needs matching, and not even that from a leaf
        if Some(j) == last_created_leaf && j > 1 {
            if self.arena.get(prev_ext_end).is_leaf() {
                return Descent::AtNode(prev_ext_end);
            }
            let frag = [EdgeLabel::span(i - 1, i - 1)];
            return descend(&self.arena, &self.text, self.phase, prev_ext_end, &frag);
        }

        match self.pre_match(prev_ext_end) {
            Jump::Direct(target) => Descent::AtNode(target),
            Jump::Rematch { target, fragments } => {
                descend(&self.arena, &self.text, self.phase, target, &fragments)
            }
            Jump::FromRoot => {
                let frag = [EdgeLabel::span(j, i - 1)];
                descend(&self.arena, &self.text, self.phase, ROOT, &frag)
            }
        }
    }

    /// Canonical-reference jump: find the nearest suffix link at or above
    /// `p` and the fragments that must be re-matched below its target.
    fn pre_match(&self, p: NodeId) -> Jump {
        debug_assert_ne!(p, ROOT);
        let pn = self.arena.get(p);

        if let Some(link) = pn.link {
            return Jump::Direct(link);
        }

        let v = pn.parent.expect("non-root node has a parent");
        if v == ROOT {
            return Jump::FromRoot;
        }

        let vn = self.arena.get(v);
        let p_edge = pn.edge.expect("non-root node has an edge");

        match vn.link {
            Some(target) => Jump::Rematch {
                target,
                fragments: vec![p_edge.pinned(self.phase)],
            },
            None => {
                let w = vn.parent.expect("non-root node has a parent");
                if w == ROOT {
                    return Jump::FromRoot;
                }
                // At most one ancestor may be missing its link
                let target = self.arena.get(w).link.unwrap_or_else(|| {
                    panic!(
                        "suffix tree invariant broken: nodes {} and {} both lack suffix links",
                        v, w
                    )
                });
                let v_edge = vn.edge.expect("non-root node has an edge");
                Jump::Rematch {
                    target,
                    fragments: vec![v_edge.pinned(self.phase), p_edge.pinned(self.phase)],
                }
            }
        }
    }

    /// Split the incoming edge of `child` so that the byte at
    /// `unmatched_at` begins the lower half; returns the new internal node
    /// owning the upper half.
    fn split_edge(&mut self, child: NodeId, unmatched_at: usize) -> NodeId {
        let old_edge = self.arena.get(child).edge.expect("non-root node has an edge");
        let parent = self.arena.get(child).parent.expect("non-root node has a parent");

        // Detach the old subtree, insert the internal node in its place,
        // then re-attach the subtree with a shortened edge
        self.arena
            .get_mut(parent)
            .children
            .remove(&self.text[old_edge.start]);

        let internal = self.add_edge(parent, EdgeLabel::span(old_edge.start, unmatched_at - 1));

        let n = self.arena.get_mut(child);
        n.parent = Some(internal);
        n.edge = Some(EdgeLabel {
            start: unmatched_at,
            end: old_edge.end,
        });
        let byte = self.text[unmatched_at];
        self.arena.get_mut(internal).children.insert(byte, child);

        internal
    }

    fn add_edge(&mut self, parent: NodeId, edge: EdgeLabel) -> NodeId {
        let byte = self.text[edge.start];
        debug_assert!(
            !self.arena.get(parent).children.contains_key(&byte),
            "duplicate first byte {:#04x} under node {}",
            byte,
            parent
        );
        let id = self.arena.alloc(Node::with_edge(edge, parent));
        self.arena.get_mut(parent).children.insert(byte, id);
        id
    }

    fn set_leaf(&mut self, id: NodeId, number: usize) {
        self.arena.get_mut(id).leaf = Some(number as u32);
    }

    fn set_link(&mut self, from: NodeId, to: NodeId) {
        let n = self.arena.get_mut(from);
        debug_assert!(n.link.is_none(), "suffix link of node {} set twice", from);
        n.link = Some(to);
    }

    /// Finalization: close every leaf's open edge to `end`, fixing each
    /// leaf's path label to its full suffix. Explicit worklist, the tree
    /// can be deep on repetitive texts.
    fn close_leaves(&mut self, end: usize) {
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            if self.arena.get(id).is_leaf() {
                let n = self.arena.get_mut(id);
                if let Some(edge) = n.edge.as_mut() {
                    edge.end = Some(end);
                }
            } else {
                stack.extend(self.arena.get(id).children.values().copied());
            }
        }
    }
}
