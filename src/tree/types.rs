//! Core types for the suffix tree
//!
//! This module defines edge labels, arena nodes and the error type shared
//! by construction and queries. Nodes live in a single growable arena and
//! refer to each other by index, so parent pointers, suffix links and child
//! maps never form ownership cycles.

use rustc_hash::FxHashMap;

/// Index of a node in the arena
pub type NodeId = u32;

/// The arena slot always holding the root node
pub const ROOT: NodeId = 0;

/// Sentinel byte appended by the CLI when a text does not already carry a
/// unique terminal byte. Using 0x00 as it's invalid in most text.
pub const SENTINEL_BYTE: u8 = 0x00;

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors surfaced to callers of the tree API
///
/// Broken internal invariants are deliberately *not* represented here: the
/// construction algorithm panics on those, because they cannot be caused by
/// any input text, only by a defective implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// `build` was given an empty text
    EmptyText,
    /// `contains` / `search` was given an empty query
    EmptyQuery,
    /// An edge label was constructed with `end < start`
    InvalidEdge { start: usize, end: usize },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::EmptyText => write!(f, "text must not be empty"),
            TreeError::EmptyQuery => write!(f, "query must not be empty"),
            TreeError::InvalidEdge { start, end } => {
                write!(f, "invalid edge label: end {} < start {}", end, start)
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// A label on a tree edge: an inclusive byte range `[start, end]` into the
/// indexed text.
///
/// `end == None` is the OPEN sentinel: the edge grows with the construction
/// phase and its effective end is `phase - 1` (the position most recently
/// processed by the builder). Finalization closes every open edge, so a
/// finished tree contains only closed labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLabel {
    pub start: usize,
    pub end: Option<usize>,
}

impl EdgeLabel {
    /// Create a closed label, validating `start <= end`.
    pub fn closed(start: usize, end: usize) -> TreeResult<Self> {
        if end < start {
            return Err(TreeError::InvalidEdge { start, end });
        }
        Ok(Self { start, end: Some(end) })
    }

    /// Create an open label growing with the current phase.
    pub fn open(start: usize) -> Self {
        Self { start, end: None }
    }

    /// Closed label known valid by construction.
    pub(crate) fn span(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end: Some(end) }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Effective end index, resolving an open end against the phase.
    pub fn end_index(&self, phase: usize) -> usize {
        self.end.unwrap_or(phase - 1)
    }

    /// Number of bytes on the edge as of the given phase.
    pub fn len_at(&self, phase: usize) -> usize {
        self.end_index(phase) - self.start + 1
    }

    /// Copy of this label with any open end pinned to the given phase.
    pub(crate) fn pinned(&self, phase: usize) -> Self {
        Self {
            start: self.start,
            end: Some(self.end_index(phase)),
        }
    }
}

/// A vertex of the suffix tree.
///
/// Everything is index-based: `parent` and `link` point back into the arena,
/// `children` maps the first byte of each child's edge to the child's index.
/// At most one child per distinct first byte, which is what makes the
/// structure a tree. `link` is assigned at most once and never on leaves.
#[derive(Debug, Clone)]
pub struct Node {
    /// Incoming edge label; `None` only for the root
    pub edge: Option<EdgeLabel>,
    /// Owning node; `None` only for the root
    pub parent: Option<NodeId>,
    /// Suffix link target (internal nodes only)
    pub link: Option<NodeId>,
    /// First byte of child edge -> child index
    pub children: FxHashMap<u8, NodeId>,
    /// `Some(k)` marks a leaf for the suffix starting at offset `k`
    pub leaf: Option<u32>,
}

impl Node {
    fn root() -> Self {
        Self {
            edge: None,
            parent: None,
            link: None,
            children: FxHashMap::default(),
            leaf: None,
        }
    }

    pub(crate) fn with_edge(edge: EdgeLabel, parent: NodeId) -> Self {
        Self {
            edge: Some(edge),
            parent: Some(parent),
            link: None,
            children: FxHashMap::default(),
            leaf: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf.is_some()
    }

    /// Starting offset of the suffix this leaf represents.
    pub fn leaf_number(&self) -> Option<usize> {
        self.leaf.map(|k| k as usize)
    }
}

/// Growable node arena; slot 0 is always the root.
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub(crate) fn with_root() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Child of `id` whose edge starts with `byte`, if any.
    pub fn child(&self, id: NodeId, byte: u8) -> Option<NodeId> {
        self.get(id).children.get(&byte).copied()
    }

    /// Total number of nodes, root included; never zero, the root is
    /// allocated up front.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
