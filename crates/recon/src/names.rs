//! Multi-word name comparison. Person names vary in token order, middle-name
//! inclusion and minor spelling, so equivalence is declared from an absolute
//! count of similar token pairs rather than whole-string similarity.

use crate::similarity::similar;

/// Default minimum number of token pairs that must align.
pub const DEFAULT_MIN_MATCHED_WORDS: usize = 3;

/// Greedy one-to-one token assignment: for each word of `a` in order, claim
/// the first unused word of `b` that is similar to it. True iff at least
/// `min_matched_words` pairs align. Empty input on either side is false.
///
/// First-fit is kept deliberately: ambiguous token orders can assign a word
/// to the wrong twin and under-count relative to optimal bipartite matching.
pub fn names_match(a: &str, b: &str, min_matched_words: usize, threshold: f64) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    let words_a: Vec<&str> = a.split_whitespace().collect();
    let words_b: Vec<&str> = b.split_whitespace().collect();

    let mut used = vec![false; words_b.len()];
    let mut matched = 0;
    for word_a in &words_a {
        for (idx, word_b) in words_b.iter().enumerate() {
            if !used[idx] && similar(word_a, word_b, threshold) {
                used[idx] = true;
                matched += 1;
                break;
            }
        }
    }
    matched >= min_matched_words
}
