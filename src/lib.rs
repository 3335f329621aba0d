//! # STXI - Suffix Tree Text Index
//!
//! STXI builds a compressed trie of all suffixes of a fixed text (a suffix
//! tree) in linear time with Ukkonen's online algorithm, and answers
//! substring-existence and substring-occurrence queries against it. It is
//! meant for fast repeated substring search over a large, static text:
//! bioinformatics, text indexing, duplicate detection.
//!
//! ## Architecture
//!
//! - [`tree`] - construction (Ukkonen's algorithm), queries, diagnostics
//! - [`output`] - result formatting for the CLI
//!
//! ## Quick Start
//!
//! ```
//! use stxi::tree::SuffixTree;
//!
//! // The trailing sentinel guarantees every suffix its own leaf
//! let tree = SuffixTree::build("banana$").unwrap();
//!
//! assert!(tree.contains(b"nan").unwrap());
//! assert!(!tree.contains(b"xyz").unwrap());
//!
//! let mut offsets = tree.search(b"ana").unwrap();
//! offsets.sort_unstable();
//! assert_eq!(offsets, vec![1, 3]);
//! ```
//!
//! ## Performance
//!
//! Construction is O(n) through three devices: skip/count edge matching
//! (whole edges consumed by length, never byte-at-a-time), suffix links
//! with a two-level canonical-reference jump between extensions, and a
//! last-created-leaf shortcut that lets each phase skip extensions already
//! known to be present. Queries cost O(m) for a pattern of length m plus
//! output size; the finished tree is immutable and safe to query from any
//! number of threads.

pub mod output;
pub mod tree;

pub use tree::{SuffixTree, TreeError, TreeStats};
