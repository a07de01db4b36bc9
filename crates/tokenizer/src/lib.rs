//! Pairfuse-tokenizer - high-level tokenizer API
//!
//! This crate ties the vocabulary, the merge trainer and the encoder and
//! decoder together behind a single `Tokenizer`.
//!
//! # Features
//!
//! - Training from text lines with a vocabulary-size target and merge budget
//! - Greedy longest-match encoding against learned merge outputs
//! - Decoding that re-glues raw characters with known subwords
//! - Snapshots of the trained state for an external persistence layer
//!
//! Encoding is not canonical BPE: it never replays merges in rank order, it
//! looks for the longest substring that some merge produced. Decoding is not
//! its inverse either:
//!
//! ```rust
//! use pairfuse_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new();
//! tokenizer.train(["aa aa bb"], 100, 10)?;
//!
//! assert_eq!(tokenizer.encode("aa"), vec!["aa"]);
//! assert_eq!(tokenizer.encode("bb"), vec!["b", "b"]);
//! assert_eq!(tokenizer.decode(&["b", "b"]), "b b");
//! # Ok::<(), pairfuse_tokenizer::TokenizerError>(())
//! ```

pub use pairfuse_core::{MergeRule, MergeTable, Result, TokenizerError, Vocabulary};
pub use pairfuse_training::{StopReason, TrainingConfig, TrainingReport, TrainingStrategy};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerStats};

// Encoding and decoding
pub mod encoding;
pub use encoding::{Reconstructor, Segmenter};

// Snapshots
pub mod snapshot;
pub use snapshot::{SerializedMerge, TokenizerSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
