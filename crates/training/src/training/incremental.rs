//! Incrementally maintained pair statistics.
//!
//! Keeps an inverted index from each pair to the vocabulary entries that
//! contain it, the current pair counts, and a priority queue over those
//! counts. A merge only rewrites the entries listed for the merged pair and
//! only re-queues the pairs those entries touch, so selecting the next merge
//! no longer requires a pass over the whole vocabulary.

use super::counter::{adjacent_pairs, compute_pair_frequencies, to_pair, PairCounts};
use super::trainer::PairStatistics;
use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;
use pairfuse_core::{merge_segmentation, MergeCandidate, Pair, PairPriorityQueue, Vocabulary};

/// Pair statistics kept up to date across merges.
pub struct PairIndex {
    /// Current weighted pair counts
    pair_counts: PairCounts,
    /// Pair -> segmentation keys containing it
    occurrences: AHashMap<Pair, AHashSet<CompactString>>,
    /// Candidates ordered by count, then textual form
    queue: PairPriorityQueue,
}

impl PairIndex {
    /// Index every pair of the vocabulary.
    pub fn build(vocab: &Vocabulary) -> Self {
        let pair_counts = compute_pair_frequencies(vocab);
        let mut occurrences: AHashMap<Pair, AHashSet<CompactString>> =
            AHashMap::with_capacity(pair_counts.len());

        for (segmentation, _) in vocab.iter() {
            for (left, right) in adjacent_pairs(segmentation) {
                occurrences
                    .entry(to_pair(left, right))
                    .or_default()
                    .insert(CompactString::new(segmentation));
            }
        }

        let queue = PairPriorityQueue::from_counts(&pair_counts);
        Self {
            pair_counts,
            occurrences,
            queue,
        }
    }

    /// Current count of a pair.
    pub fn count(&self, pair: &Pair) -> u64 {
        self.pair_counts.get(pair).copied().unwrap_or(0)
    }

    /// Number of distinct pairs with a positive count.
    pub fn len(&self) -> usize {
        self.pair_counts.len()
    }

    /// Check if no pairs remain.
    pub fn is_empty(&self) -> bool {
        self.pair_counts.is_empty()
    }

    fn remove_entry_pairs(
        &mut self,
        key: &CompactString,
        freq: u64,
        merged: &Pair,
        touched: &mut AHashSet<Pair>,
    ) {
        for (left, right) in adjacent_pairs(key) {
            let pair = to_pair(left, right);
            if let Some(count) = self.pair_counts.get_mut(&pair) {
                *count = count.saturating_sub(freq);
            }
            if &pair != merged {
                if let Some(keys) = self.occurrences.get_mut(&pair) {
                    keys.remove(key);
                }
            }
            touched.insert(pair);
        }
    }

    fn add_entry_pairs(&mut self, key: &CompactString, freq: u64, touched: &mut AHashSet<Pair>) {
        for (left, right) in adjacent_pairs(key) {
            let pair = to_pair(left, right);
            *self.pair_counts.entry(pair.clone()).or_insert(0) += freq;
            self.occurrences
                .entry(pair.clone())
                .or_default()
                .insert(key.clone());
            touched.insert(pair);
        }
    }
}

impl PairStatistics for PairIndex {
    fn best(&mut self, _vocab: &Vocabulary) -> Option<MergeCandidate> {
        self.queue.peek().cloned()
    }

    fn merge(&mut self, vocab: &mut Vocabulary, pair: &Pair, token: &str) {
        let Some(keys) = self.occurrences.remove(pair) else {
            return;
        };

        let mut touched: AHashSet<Pair> = AHashSet::new();
        for key in keys {
            let Some(new_key) = merge_segmentation(&key, pair, token) else {
                continue;
            };
            let Some(freq) = vocab.remove(&key) else {
                continue;
            };

            self.remove_entry_pairs(&key, freq, pair, &mut touched);
            self.add_entry_pairs(&new_key, freq, &mut touched);
            vocab.add_entry(new_key, freq);
        }

        for pair in touched {
            let count = self.count(&pair);
            if count == 0 {
                self.pair_counts.remove(&pair);
                self.occurrences.remove(&pair);
            }
            self.queue.update(pair, count);
        }
    }
}
