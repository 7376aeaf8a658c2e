//! Sequence-matching similarity ratio.
//!
//! The ratio is `2 * M / T`, where `T` is the combined length of both strings
//! and `M` the total size of the matching blocks found by repeatedly taking
//! the longest common block and recursing into the pieces left and right of
//! it.  Block selection follows the classic "gestalt" matcher exactly
//! (earliest block wins among equally long ones, elements that are too
//! frequent in long second sequences are not used as match seeds), because
//! candidate ranking is sensitive to the precise values.
//!
//! [`ratio`] compares case-insensitively; [`ratio_exact`] compares as given.

use std::collections::HashMap;

/// Second sequences at least this long get the popular-element heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A run of equal elements: `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Matcher over two character sequences.  Indexes `b` once so that the
/// longest-block search only visits positions where `a[i]` occurs in `b`.
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        // Drop characters that make up more than 1% of a long `b`.
        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|_, idxs| idxs.len() <= ntest);
        }

        SequenceMatcher { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among maximal blocks the one starting earliest in `a` wins, then the
    /// one starting earliest in `b`.  Returns a zero-sized block at
    /// `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        // j2len[j] = length of the match ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(indices) = self.b2j.get(&self.a[i]) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Popular characters never seed a match but may still extend one.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        MatchingBlock { a_start: best_i, b_start: best_j, size: best_size }
    }

    /// All matching blocks in ascending order, adjacent blocks merged, with no
    /// trailing sentinel.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
        }
        blocks.sort();

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.size == block.a_start
                        && last.b_start + last.size == block.b_start =>
                {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        2.0 * matches as f64 / total as f64
    }
}

/// Similarity of two strings as given, in `[0, 1]`.
pub fn ratio_exact(a: &str, b: &str) -> f64 {
    SequenceMatcher::new(a, b).ratio()
}

/// Case-insensitive similarity of two strings, in `[0, 1]`.
pub fn ratio(a: &str, b: &str) -> f64 {
    ratio_exact(&a.to_lowercase(), &b.to_lowercase())
}
