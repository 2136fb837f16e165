//! Sequence similarity used as the last-resort matching strategy.
//!
//! Implements the classic matching-blocks ratio (Ratcliff/Obershelp): find
//! the longest common block, recurse on the pieces to its left and right, and
//! score `2 * M / (len(a) + len(b))` where `M` is the total matched length.
//! Inputs here are short chat strings, so the quadratic block search is fine.

/// Similarity ratio in [0.0, 1.0]. Two empty strings are identical (1.0).
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let matched = matching_total(&a, &b);
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Total length of all recursive matching blocks.
fn matching_total(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size > 0 {
            total += size;
            queue.push((alo, i, blo, j));
            queue.push((i + size, ahi, j + size, bhi));
        }
    }
    total
}

/// Longest block `a[i..i+size] == b[j..j+size]` within the given windows.
/// Earliest block wins on ties.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    let width = bhi.saturating_sub(blo);
    // run_lengths[j - blo]: length of the common block ending at (i, j)
    let mut run_lengths = vec![0usize; width];
    for i in alo..ahi {
        let mut next = vec![0usize; width];
        for j in blo..bhi {
            if a[i] == b[j] {
                let size = if j > blo { run_lengths[j - blo - 1] + 1 } else { 1 };
                next[j - blo] = size;
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        run_lengths = next;
    }
    (best_i, best_j, best_size)
}
