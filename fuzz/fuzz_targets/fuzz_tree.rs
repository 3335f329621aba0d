#![no_main]

use libfuzzer_sys::fuzz_target;
use stxi::tree::SuffixTree;

fuzz_target!(|data: &[u8]| {
    // Construction must never panic on any non-empty input text.
    if data.is_empty() || data.len() > 4096 {
        return;
    }

    let start = (data[0] as usize) % data.len();
    let max = data.len() - start;
    let len = 1 + (data[data.len() - 1] as usize) % max;
    let pattern = &data[start..start + len];

    // Containment holds with or without a terminal sentinel
    let tree = SuffixTree::build(data.to_vec()).unwrap();
    assert!(tree.contains(pattern).unwrap());

    // Full occurrence enumeration needs every suffix at its own leaf, so
    // only cross-check when a unique sentinel byte can be appended
    if !data.contains(&0) {
        let mut text = data.to_vec();
        text.push(0);
        let tree = SuffixTree::build(text.clone()).unwrap();

        let mut got = tree.search(pattern).unwrap();
        got.sort_unstable();
        // Overlapping occurrences count too, so step forward one byte per
        // hit instead of taking find_iter's non-overlapping matches
        let mut expected = Vec::new();
        let mut from = 0;
        while let Some(p) = memchr::memmem::find(&text[from..], pattern) {
            expected.push(from + p);
            from += p + 1;
        }
        assert_eq!(got, expected);
        assert!(got.contains(&start));
    }
});
