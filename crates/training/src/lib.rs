//! Pairfuse-training - merge-rule learning
//!
//! This crate learns merge rules from text: it seeds a character-level
//! vocabulary, counts adjacent pairs, and repeatedly fuses the most frequent
//! one.
//!
//! # Features
//!
//! - Deterministic merge selection (frequency, then textual order of the pair)
//! - Two interchangeable strategies: full recount, or an incrementally
//!   maintained pair index with a priority queue
//! - Progress reported through the `log` facade
//!
//! # Example
//!
//! ```rust
//! use pairfuse_training::{BpeTrainer, StopReason, TrainingConfig};
//!
//! let config = TrainingConfig::builder()
//!     .vocab_size(1_000)
//!     .max_merges(10)
//!     .build()?;
//!
//! let model = BpeTrainer::new(config)?.train(["aa aa bb"]);
//! assert_eq!(model.merges.get("a", "a"), Some("aa"));
//! assert_eq!(
//!     model.report.stop_reason,
//!     StopReason::BelowMinFrequency { best_frequency: 1 }
//! );
//! # Ok::<(), pairfuse_training::TokenizerError>(())
//! ```

pub use pairfuse_core::{Result, TokenizerError};

pub mod training;
pub use training::{
    compute_pair_frequencies, BpeTrainer, PairCounts, PairIndex, PairStatistics, Recount,
    StopReason, TrainedModel, TrainingConfig, TrainingConfigBuilder, TrainingReport,
    TrainingStrategy,
};
