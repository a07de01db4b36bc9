//! Priority queue for merge candidates.
//!
//! Candidates are ordered by frequency, and ties are broken by the textual
//! form of the pair (`"first second"`): the lexicographically smallest pair
//! wins. Every training strategy selects through [`compare_candidates`], so
//! the merge sequence is reproducible regardless of hash iteration order.

use super::merges::Pair;
use super::split::SEPARATOR;
use ahash::AHashMap;
use dary_heap::OctonaryHeap;
use std::cmp::Ordering;
use std::iter::once;

/// Order two `(pair, count)` candidates; `Greater` means higher priority.
pub fn compare_candidates(a: (&Pair, u64), b: (&Pair, u64)) -> Ordering {
    a.1.cmp(&b.1)
        .then_with(|| textual_form(b.0).cmp(textual_form(a.0)))
}

fn textual_form(pair: &Pair) -> impl Iterator<Item = char> + '_ {
    pair.0.chars().chain(once(SEPARATOR)).chain(pair.1.chars())
}

/// Pick the highest-priority pair from a frequency table.
pub fn best_pair(pair_counts: &AHashMap<Pair, u64>) -> Option<MergeCandidate> {
    pair_counts
        .iter()
        .max_by(|a, b| compare_candidates((a.0, *a.1), (b.0, *b.1)))
        .map(|(pair, &count)| MergeCandidate::new(pair.clone(), count))
}

/// A merge candidate during training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of symbols to merge
    pub pair: Pair,
    /// The weighted frequency of this pair
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }
}

impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_candidates((&self.pair, self.count), (&other.pair, other.count))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-priority queue of merge candidates with lazy invalidation.
///
/// Uses an 8-ary heap for better cache locality than a binary heap.
/// Updating a pair pushes a fresh entry; entries whose count no longer
/// matches the tracked count are dropped when they surface.
pub struct PairPriorityQueue {
    /// The heap storing merge candidates
    heap: OctonaryHeap<MergeCandidate>,
    /// Track current counts to detect stale entries
    current_counts: AHashMap<Pair, u64>,
}

impl PairPriorityQueue {
    /// Create a new priority queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
            current_counts: AHashMap::with_capacity(capacity),
        }
    }

    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Build a queue from a full frequency table.
    pub fn from_counts(pair_counts: &AHashMap<Pair, u64>) -> Self {
        let mut queue = Self::with_capacity(pair_counts.len());
        for (pair, &count) in pair_counts {
            queue.update(pair.clone(), count);
        }
        queue
    }

    /// Set the count for a pair, invalidating any older entry for it.
    ///
    /// A count of zero removes the pair.
    pub fn update(&mut self, pair: Pair, count: u64) {
        if count == 0 {
            self.current_counts.remove(&pair);
            return;
        }
        self.current_counts.insert(pair.clone(), count);
        self.heap.push(MergeCandidate::new(pair, count));
    }

    /// Remove a pair so that none of its entries is returned again.
    pub fn remove(&mut self, pair: &Pair) {
        self.current_counts.remove(pair);
    }

    /// Return the highest priority live candidate without consuming it.
    ///
    /// Stale entries found on the way are discarded.
    pub fn peek(&mut self) -> Option<&MergeCandidate> {
        while let Some(top) = self.heap.peek() {
            if self.current_counts.get(&top.pair) == Some(&top.count) {
                break;
            }
            self.heap.pop();
        }
        self.heap.peek()
    }

    /// Pop the highest priority live candidate.
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        while let Some(candidate) = self.heap.pop() {
            if self.current_counts.get(&candidate.pair) == Some(&candidate.count) {
                self.current_counts.remove(&candidate.pair);
                return Some(candidate);
            }
        }
        None
    }

    /// Current count tracked for a pair.
    pub fn get_count(&self, pair: &Pair) -> Option<u64> {
        self.current_counts.get(pair).copied()
    }

    /// Number of live pairs.
    pub fn len(&self) -> usize {
        self.current_counts.len()
    }

    /// Check if no live pairs remain.
    pub fn is_empty(&self) -> bool {
        self.current_counts.is_empty()
    }
}

impl Default for PairPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}
