//! Frequency-weighted word segmentations.
//!
//! Each entry maps a word's current segmentation (its symbols joined by
//! [`SEPARATOR`](super::split::SEPARATOR)) to the number of times the word
//! occurred in the corpus.
//! Merges only regroup characters, so the symbols of an entry always
//! concatenate back to the original word.

use super::merges::Pair;
use super::split::{char_segmentation, join_symbols, split_words, surface, symbols};
use ahash::AHashMap;
use compact_str::CompactString;

/// Segmentation key -> word frequency
pub type SegmentationMap = AHashMap<CompactString, u64>;

/// Vocabulary of word segmentations with their corpus frequencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: SegmentationMap,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SegmentationMap::with_capacity(capacity),
        }
    }

    /// Build the character-level vocabulary of a corpus.
    ///
    /// Every line is split on whitespace, identical words are counted, and
    /// each distinct word is seeded as one symbol per `char`.
    pub fn from_corpus<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word_counts: AHashMap<CompactString, u64> = AHashMap::new();
        for line in corpus {
            for word in split_words(line.as_ref()) {
                *word_counts.entry(CompactString::new(word)).or_insert(0) += 1;
            }
        }

        let mut vocab = Self::with_capacity(word_counts.len());
        for (word, count) in word_counts {
            vocab.add_entry(char_segmentation(&word), count);
        }
        vocab
    }

    /// Add `frequency` occurrences of a segmentation, summing on collision.
    pub fn add_entry(&mut self, segmentation: CompactString, frequency: u64) {
        *self.entries.entry(segmentation).or_insert(0) += frequency;
    }

    /// Remove an entry, returning its frequency.
    pub fn remove(&mut self, segmentation: &str) -> Option<u64> {
        self.entries.remove(segmentation)
    }

    /// Frequency of a segmentation.
    #[inline]
    pub fn get(&self, segmentation: &str) -> Option<u64> {
        self.entries.get(segmentation).copied()
    }

    /// Find the current segmentation of a word.
    pub fn segmentation_of(&self, word: &str) -> Option<&str> {
        self.entries
            .keys()
            .find(|key| surface(key) == word)
            .map(|key| key.as_str())
    }

    /// Iterate over `(segmentation, frequency)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of distinct entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all word frequencies.
    pub fn total_frequency(&self) -> u64 {
        self.entries.values().sum()
    }

    /// Replace every occurrence of `pair` with `token` across all entries.
    ///
    /// Returns the number of entries that changed.
    pub fn apply_merge(&mut self, pair: &Pair, token: &str) -> usize {
        let mut rewritten = 0;
        let mut updated = SegmentationMap::with_capacity(self.entries.len());
        for (key, freq) in self.entries.drain() {
            let key = match merge_segmentation(&key, pair, token) {
                Some(new_key) => {
                    rewritten += 1;
                    new_key
                }
                None => key,
            };
            *updated.entry(key).or_insert(0) += freq;
        }
        self.entries = updated;
        rewritten
    }
}

/// Rewrite one segmentation, fusing each non-overlapping occurrence of
/// `pair` from left to right. Matches whole symbols only.
///
/// Returns `None` when the pair does not occur.
pub fn merge_segmentation(segmentation: &str, pair: &Pair, token: &str) -> Option<CompactString> {
    let parts: Vec<&str> = symbols(segmentation).collect();
    let mut merged: Vec<&str> = Vec::with_capacity(parts.len());
    let mut changed = false;

    let mut i = 0;
    while i < parts.len() {
        if i + 1 < parts.len()
            && parts[i] == pair.0.as_str()
            && parts[i + 1] == pair.1.as_str()
        {
            merged.push(token);
            changed = true;
            i += 2;
        } else {
            merged.push(parts[i]);
            i += 1;
        }
    }

    changed.then(|| join_symbols(merged))
}
