//! Core data structures for pair-merge tokenization.
//!
//! This module holds the vocabulary of word segmentations, the merge table
//! and the priority queue used to pick the next merge, independent of how
//! training is driven.

pub mod merges;
pub mod priority;
pub mod split;
pub mod vocab;

pub use merges::{MergeRule, MergeTable, Pair};
pub use priority::{best_pair, compare_candidates, MergeCandidate, PairPriorityQueue};
pub use split::{char_segmentation, join_symbols, split_words, surface, symbols, SEPARATOR};
pub use vocab::{merge_segmentation, SegmentationMap, Vocabulary};
