//! Tree diagnostics
//!
//! Counts and depths computed purely through the read contract, for the
//! CLI `stats` subcommand and for sanity checks in tests. Traversal is an
//! explicit worklist; trees over repetitive texts get deep.

use super::SuffixTree;
use serde::Serialize;

/// Summary statistics of a finished suffix tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeStats {
    /// Length of the indexed text in bytes
    pub text_len: usize,
    /// Total nodes, root included
    pub node_count: usize,
    /// Internal nodes, root excluded
    pub internal_count: usize,
    /// Leaves (distinct suffixes with their own node)
    pub leaf_count: usize,
    /// Resolved suffix links
    pub link_count: usize,
    /// Maximum node depth in edges
    pub max_depth: usize,
}

impl TreeStats {
    pub fn gather(tree: &SuffixTree) -> Self {
        let mut stats = TreeStats {
            text_len: tree.text().len(),
            node_count: tree.node_count(),
            ..Default::default()
        };

        let mut stack = vec![(tree.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = tree.node(id);
            stats.max_depth = stats.max_depth.max(depth);
            if node.link.is_some() {
                stats.link_count += 1;
            }
            if node.is_leaf() {
                stats.leaf_count += 1;
            } else {
                if id != tree.root() {
                    stats.internal_count += 1;
                }
                stack.extend(node.children.values().map(|&c| (c, depth + 1)));
            }
        }
        stats
    }
}

/// Render stats in the aligned-column CLI format.
pub fn show_stats(stats: &TreeStats) {
    println!("Suffix Tree Statistics");
    println!("======================");
    println!();
    println!("Text length:      {}", stats.text_len);
    println!("Node count:       {}", stats.node_count);
    println!("Internal nodes:   {}", stats.internal_count);
    println!("Leaves:           {}", stats.leaf_count);
    println!("Suffix links:     {}", stats.link_count);
    println!("Max depth:        {}", stats.max_depth);
}
