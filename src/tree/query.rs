//! Substring queries against a finished tree
//!
//! `contains` and `search` share one walk from the root: pick the child
//! whose edge starts with the next unmatched query byte, then compare the
//! query against that edge byte by byte (queries are expected to be much
//! shorter than the text, so bulk skipping buys nothing here). A full match
//! lands on the node whose subtree holds exactly the occurrences of the
//! query; `search` then sweeps that subtree for leaf numbers.
//!
//! Queries never mutate the tree, so any number may run concurrently once
//! construction has finished.

use super::types::{NodeId, TreeError, TreeResult, ROOT};
use super::SuffixTree;

impl SuffixTree {
    /// Whether `query` occurs anywhere in the text.
    ///
    /// Empty queries are rejected, not treated as "matches everything".
    pub fn contains(&self, query: &[u8]) -> TreeResult<bool> {
        Ok(self.walk(query)?.is_some())
    }

    /// Starting offsets of every occurrence of `query` in the text.
    ///
    /// Order is subtree traversal order and deliberately unspecified;
    /// callers needing sorted output must sort. Re-invoking is cheap and
    /// idempotent.
    pub fn search(&self, query: &[u8]) -> TreeResult<Vec<usize>> {
        let Some(matched) = self.walk(query)? else {
            return Ok(Vec::new());
        };

        let mut offsets = Vec::new();
        let mut stack = vec![matched];
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            match node.leaf_number() {
                Some(k) => offsets.push(k),
                None => stack.extend(node.children.values().copied()),
            }
        }
        Ok(offsets)
    }

    /// Shared walk; `Some(node)` is the node at or inside whose incoming
    /// edge the full query ended.
    fn walk(&self, query: &[u8]) -> TreeResult<Option<NodeId>> {
        if query.is_empty() {
            return Err(TreeError::EmptyQuery);
        }

        let text = self.text();
        let mut node = ROOT;
        let mut k = 0;

        loop {
            let Some(child) = self.arena().child(node, query[k]) else {
                return Ok(None);
            };
            let edge = self.node(child).edge.expect("non-root node has an edge");
            let end = edge.end.expect("finished tree has no open edges");

            let mut cursor = edge.start;
            while k < query.len() && cursor <= end {
                if query[k] != text[cursor] {
                    return Ok(None);
                }
                k += 1;
                cursor += 1;
            }

            if k == query.len() {
                return Ok(Some(child));
            }
            node = child;
        }
    }
}
