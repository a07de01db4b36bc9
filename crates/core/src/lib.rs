//! Pairfuse-core - Core data structures for pair-merge subword tokenization
//!
//! This crate provides the vocabulary of frequency-weighted word
//! segmentations, the append-only merge table and the merge-candidate
//! priority queue shared by the training and tokenizer crates.
//!
//! # Features
//!
//! - Vocabulary storage using `AHashMap` and compact strings
//! - Whole-symbol merge rewriting over separator-joined segmentations
//! - Deterministic merge selection (frequency, then textual order)
//! - Error handling with `thiserror`
//!
//! # Example
//!
//! ```rust
//! use pairfuse_core::{MergeTable, Vocabulary};
//!
//! let mut vocab = Vocabulary::from_corpus(["aa aa bb"]);
//! assert_eq!(vocab.get("a a"), Some(2));
//!
//! let mut merges = MergeTable::new();
//! merges.record("a", "a");
//! vocab.apply_merge(&("a".into(), "a".into()), "aa");
//! assert_eq!(vocab.get("aa"), Some(2));
//! assert!(merges.contains_output("aa"));
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use self::core::{
    best_pair, char_segmentation, compare_candidates, join_symbols, merge_segmentation,
    split_words, surface, symbols, MergeCandidate, MergeRule, MergeTable, Pair,
    PairPriorityQueue, SegmentationMap, Vocabulary, SEPARATOR,
};
