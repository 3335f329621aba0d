//! Structural and behavioral properties of the suffix tree.
//!
//! Each property is checked on fixed worked examples and on pseudo-random
//! corpora over small alphabets (short strings over {a,b} and {a..d},
//! longer ones over {a..f}), every text terminated by a '$' sentinel so
//! each suffix gets its own leaf. Search results are cross-checked against
//! a naive scan of the text.

use stxi::tree::{NodeId, SuffixTree, TreeError};

/// Deterministic xorshift generator so failures reproduce.
struct XorShift(u64);

impl XorShift {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// Random text over `alphabet` letters starting at 'a', '$'-terminated.
fn random_text(rng: &mut XorShift, alphabet: u8, len: usize) -> Vec<u8> {
    let mut text = Vec::with_capacity(len + 1);
    for _ in 0..len {
        text.push(b'a' + (rng.next() % alphabet as u64) as u8);
    }
    text.push(b'$');
    text
}

/// All (id, node) pairs reachable from the root.
fn all_nodes(tree: &SuffixTree) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(tree.node(id).children.values().copied());
    }
    out
}

/// Offsets of `pattern` in `text` by naive scanning, overlapping
/// occurrences included ("anana" contains "ana" at 0 and 2).
fn naive_occurrences(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&o| &text[o..o + pattern.len()] == pattern)
        .collect()
}

/// Check every structural invariant the finished tree must satisfy.
fn check_structure(tree: &SuffixTree) {
    let text = tree.text();
    let n = text.len();

    let mut leaf_numbers = Vec::new();
    for id in all_nodes(tree) {
        let node = tree.node(id);

        // Every node except the root has exactly one parent and edge
        if id == tree.root() {
            assert!(node.parent.is_none());
            assert!(node.edge.is_none());
        } else {
            assert!(node.parent.is_some());
            assert!(node.edge.is_some());
            assert!(!node.edge.unwrap().is_open());
        }

        // Children keyed by the true first byte of their edge
        for (&byte, &child) in &node.children {
            let edge = tree.node(child).edge.unwrap();
            assert_eq!(text[edge.start], byte);
            assert_eq!(tree.node(child).parent, Some(id));
        }

        if let Some(k) = node.leaf_number() {
            // Leaf k's path label is exactly the suffix starting at k
            assert_eq!(tree.path_label(id), &text[k..]);
            assert!(node.link.is_none(), "leaf {} carries a suffix link", id);
            assert!(node.children.is_empty());
            leaf_numbers.push(k);
        } else if id != tree.root() {
            // Suffix-link invariant on internal nodes
            let link = tree
                .node(id)
                .link
                .unwrap_or_else(|| panic!("internal node {} has no suffix link", id));
            let label = tree.path_label(id);
            assert_eq!(tree.path_label(link), label[1..].to_vec());
        }
    }

    // '$'-terminated text: exactly n leaves numbered {0, .., n-1}
    leaf_numbers.sort_unstable();
    assert_eq!(leaf_numbers, (0..n).collect::<Vec<_>>());
}

/// Cross-check contains/search against naive scanning for every substring
/// of the text up to `max_len`, plus some absent patterns.
fn check_queries(tree: &SuffixTree, max_len: usize) {
    let text = tree.text();
    for start in 0..text.len() {
        for len in 1..=max_len.min(text.len() - start) {
            let pattern = &text[start..start + len];
            let expected = naive_occurrences(text, pattern);
            let mut got = tree.search(pattern).unwrap();
            got.sort_unstable();
            assert_eq!(got, expected, "pattern {:?}", pattern);
            assert!(tree.contains(pattern).unwrap());
        }
    }

    assert!(!tree.contains(b"zz@").unwrap());
    assert_eq!(tree.search(b"zz@").unwrap(), Vec::<usize>::new());
}

#[test]
fn banana_worked_example() {
    let tree = SuffixTree::build("banana$").unwrap();

    check_structure(&tree);

    let mut ana = tree.search(b"ana").unwrap();
    ana.sort_unstable();
    assert_eq!(ana, vec![1, 3]);

    assert!(tree.contains(b"nan").unwrap());
    assert!(!tree.contains(b"xyz").unwrap());

    let mut a = tree.search(b"a").unwrap();
    a.sort_unstable();
    assert_eq!(a, vec![1, 3, 5]);

    assert_eq!(tree.contains(b"").unwrap_err(), TreeError::EmptyQuery);
}

#[test]
fn invalid_arguments() {
    assert_eq!(SuffixTree::build("").unwrap_err(), TreeError::EmptyText);

    let tree = SuffixTree::build("ab$").unwrap();
    assert_eq!(tree.search(b"").unwrap_err(), TreeError::EmptyQuery);
}

#[test]
fn classic_fixtures() {
    for text in ["mississippi$", "abcabxabcd$", "abracadabra$", "aabbaabb$"] {
        let tree = SuffixTree::build(text).unwrap();
        check_structure(&tree);
        check_queries(&tree, text.len());
    }
}

#[test]
fn overlapping_occurrences_all_reported() {
    // "aba" occurs at 0, 2 and 4; occurrences 0/2 and 2/4 overlap and must
    // all be reported, not just a non-overlapping subset
    let tree = SuffixTree::build("abababa$").unwrap();
    check_structure(&tree);

    let mut hits = tree.search(b"aba").unwrap();
    hits.sort_unstable();
    assert_eq!(hits, vec![0, 2, 4]);
    assert_eq!(naive_occurrences(tree.text(), b"aba"), vec![0, 2, 4]);

    // Same property inside check_queries' oracle on a self-overlapping text
    let tree = SuffixTree::build("anana$").unwrap();
    let mut hits = tree.search(b"ana").unwrap();
    hits.sort_unstable();
    assert_eq!(hits, vec![0, 2]);
    check_queries(&tree, 6);
}

#[test]
fn repetitive_texts_stay_correct() {
    // Deep, skewed trees; traversals must not recurse
    let mut aaa = vec![b'a'; 3000];
    aaa.push(b'$');
    let tree = SuffixTree::build(aaa.clone()).unwrap();
    check_structure(&tree);
    assert_eq!(tree.search(b"aaa").unwrap().len(), 2998);

    let mut abab = Vec::new();
    for _ in 0..1000 {
        abab.extend_from_slice(b"ab");
    }
    abab.push(b'$');
    let tree = SuffixTree::build(abab).unwrap();
    check_structure(&tree);
    assert_eq!(tree.search(b"aba").unwrap().len(), 999);
}

#[test]
fn single_and_two_byte_texts() {
    let tree = SuffixTree::build("x").unwrap();
    check_structure(&tree);
    assert!(tree.contains(b"x").unwrap());
    assert_eq!(tree.search(b"x").unwrap(), vec![0]);

    let tree = SuffixTree::build("a$").unwrap();
    check_structure(&tree);
    assert_eq!(tree.search(b"a").unwrap(), vec![0]);
    assert_eq!(tree.search(b"$").unwrap(), vec![1]);
}

#[test]
fn random_small_alphabet_corpora() {
    let mut rng = XorShift::new(0x5eed);
    for round in 0..20 {
        let len = 1 + (rng.next() % 400) as usize;
        let alphabet = if round % 2 == 0 { 2 } else { 4 };
        let text = random_text(&mut rng, alphabet, len);

        let tree = SuffixTree::build(text).unwrap();
        check_structure(&tree);
        check_queries(&tree, 8);
    }
}

#[test]
fn random_larger_corpora() {
    let mut rng = XorShift::new(0xdead_beef);
    for _ in 0..3 {
        let text = random_text(&mut rng, 6, 5000);
        let tree = SuffixTree::build(text.clone()).unwrap();
        check_structure(&tree);

        // Spot-check a handful of substrings rather than the full grid
        for _ in 0..50 {
            let start = (rng.next() % (text.len() as u64 - 1)) as usize;
            let max = (text.len() - start).min(12);
            let len = 1 + (rng.next() % max as u64) as usize;
            let pattern = &text[start..start + len];

            let expected = naive_occurrences(&text, pattern);
            let mut got = tree.search(pattern).unwrap();
            got.sort_unstable();
            assert_eq!(got, expected);
        }
    }
}

#[test]
fn construction_is_deterministic() {
    let text = "abcabxabcd$";
    let a = SuffixTree::build(text).unwrap();
    let b = SuffixTree::build(text).unwrap();

    // Same shape: identical edge boundaries and leaf numbers, compared as
    // canonical (path label, edge range, leaf number) sets so that child
    // iteration order cannot matter
    let canon = |tree: &SuffixTree| {
        let mut items: Vec<(Vec<u8>, Option<usize>)> = all_nodes(tree)
            .into_iter()
            .map(|id| (tree.path_label(id), tree.node(id).leaf_number()))
            .collect();
        items.sort();
        items
    };
    assert_eq!(canon(&a), canon(&b));
    assert_eq!(a.node_count(), b.node_count());
}
