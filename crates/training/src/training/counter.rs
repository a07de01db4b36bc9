//! Pair frequency counting.
//!
//! Counts every adjacent symbol pair across the vocabulary, weighted by the
//! frequency of the word it occurs in. A word containing the same pair twice
//! contributes twice.

use ahash::AHashMap;
use compact_str::CompactString;
use pairfuse_core::{symbols, Pair, Vocabulary};

/// Pair -> weighted frequency
pub type PairCounts = AHashMap<Pair, u64>;

/// Adjacent symbol pairs of a segmentation, left to right.
pub fn adjacent_pairs(segmentation: &str) -> impl Iterator<Item = (&str, &str)> + '_ {
    let mut parts = symbols(segmentation);
    let mut prev = parts.next();
    std::iter::from_fn(move || {
        let left = prev?;
        let right = parts.next()?;
        prev = Some(right);
        Some((left, right))
    })
}

/// Owned pair from borrowed symbols.
#[inline]
pub fn to_pair(left: &str, right: &str) -> Pair {
    (CompactString::new(left), CompactString::new(right))
}

/// Count all adjacent pairs over the current vocabulary from scratch.
pub fn compute_pair_frequencies(vocab: &Vocabulary) -> PairCounts {
    let mut pair_counts = PairCounts::new();

    for (segmentation, freq) in vocab.iter() {
        for (left, right) in adjacent_pairs(segmentation) {
            *pair_counts.entry(to_pair(left, right)).or_insert(0) += freq;
        }
    }

    pair_counts
}
