//! Ratcliff/Obershelp similarity: the ratio of matching-block characters to
//! total characters, `2*M / T`. Blocks are found by repeatedly taking the
//! longest common contiguous run and recursing into the pieces on either
//! side, so matches are non-overlapping and order-preserving.

use std::collections::HashMap;

/// Default threshold for a pair of strings to count as similar.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.8;

/// Similarity ratio in `[0, 1]`. Two empty strings rate 1.0; an empty string
/// against a non-empty one rates 0.0. Symmetric in its arguments.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_len(&a, &b) as f64 / total as f64
}

/// True iff `ratio(a, b) >= threshold`.
pub fn similar(a: &str, b: &str, threshold: f64) -> bool {
    ratio(a, b) >= threshold
}

/// Total length of all matching blocks between `a` and `b`.
fn matched_len(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b_index.entry(*c).or_default().push(j);
    }

    let mut total = 0;
    let mut regions = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = regions.pop() {
        let (i, j, size) = longest_match(a, &b_index, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        total += size;
        regions.push((alo, i, blo, j));
        regions.push((i + size, ahi, j + size, bhi));
    }
    total
}

/// Longest common contiguous run within `a[alo..ahi]` / `b[blo..bhi]`,
/// returned as (start in a, start in b, length). Ties resolve to the
/// earliest start in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    // run_lengths[j] = length of the common run ending at a[i], b[j]
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b_index.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let run = if j > blo {
                    run_lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next.insert(j, run);
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        run_lengths = next;
    }
    best
}
