//! Suffix tree construction and substring search
//!
//! A compressed trie of all suffixes of a fixed text, built in linear time
//! with Ukkonen's online algorithm:
//!
//! - [`types`] - edge labels, arena nodes, error type
//! - [`matcher`] - skip/count edge matching shared by construction
//! - [`builder`] - the phase/extension loop
//! - [`query`] - `contains` / `search` over the finished tree
//! - [`stats`] - diagnostics computed from the read contract
//!
//! The finished node graph is immutable; queries take `&self` and may run
//! concurrently. Edge labels are index pairs into the text, never copies.

pub mod builder;
pub mod matcher;
pub mod query;
pub mod stats;
pub mod types;

pub use stats::TreeStats;
pub use types::{EdgeLabel, Node, NodeArena, NodeId, TreeError, TreeResult, ROOT, SENTINEL_BYTE};

use builder::TreeBuilder;

/// A suffix tree over a fixed byte text.
///
/// Note every suffix gets its own leaf only when the text ends with a byte
/// occurring nowhere else in it; appending such a sentinel is the caller's
/// responsibility (the CLI uses [`SENTINEL_BYTE`]). Without one, suffixes
/// that are prefixes of other suffixes end mid-edge rather than at a leaf.
#[derive(Debug, Clone)]
pub struct SuffixTree {
    text: Vec<u8>,
    arena: NodeArena,
}

impl SuffixTree {
    /// Build the tree for `text` in O(len) time.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyText`] if `text` is empty. No partial tree is ever
    /// returned.
    pub fn build(text: impl Into<Vec<u8>>) -> TreeResult<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(TreeError::EmptyText);
        }
        let (text, arena) = TreeBuilder::new(text).build();
        Ok(Self { text, arena })
    }

    /// The indexed text.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Entry point for traversal-based diagnostics.
    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Concatenation of edge substrings from the root down to `id`.
    ///
    /// For leaf `k` this equals `text[k..]` exactly.
    pub fn path_label(&self, id: NodeId) -> Vec<u8> {
        // Collect edges walking up, then emit them in root-to-node order
        let mut edges = Vec::new();
        let mut cur = id;
        while let Some(parent) = self.node(cur).parent {
            edges.push(self.node(cur).edge.expect("non-root node has an edge"));
            cur = parent;
        }

        let mut label = Vec::new();
        for edge in edges.iter().rev() {
            let end = edge.end.expect("finished tree has no open edges");
            label.extend_from_slice(&self.text[edge.start..=end]);
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_rejected() {
        assert_eq!(SuffixTree::build("").unwrap_err(), TreeError::EmptyText);
        assert_eq!(
            SuffixTree::build(Vec::new()).unwrap_err(),
            TreeError::EmptyText
        );
    }

    #[test]
    fn test_text_round_trips() {
        let tree = SuffixTree::build("banana$").unwrap();
        assert_eq!(tree.text(), b"banana$");
    }

    #[test]
    fn test_root_has_no_edge_or_parent() {
        let tree = SuffixTree::build("ab$").unwrap();
        let root = tree.node(tree.root());
        assert!(root.edge.is_none());
        assert!(root.parent.is_none());
        assert!(!root.is_leaf());
    }

    #[test]
    fn test_path_label_of_every_leaf_is_its_suffix() {
        let tree = SuffixTree::build("mississippi$").unwrap();
        let mut stack = vec![tree.root()];
        let mut seen = 0;
        while let Some(id) = stack.pop() {
            let node = tree.node(id);
            match node.leaf_number() {
                Some(k) => {
                    assert_eq!(tree.path_label(id), &tree.text()[k..]);
                    seen += 1;
                }
                None => stack.extend(node.children.values().copied()),
            }
        }
        assert_eq!(seen, tree.text().len());
    }
}
