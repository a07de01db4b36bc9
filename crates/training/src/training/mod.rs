//! Training infrastructure for pair-merge tokenizers.
//!
//! This module provides the pair statistics, configuration and merge loop
//! used to learn merge rules from text.

pub mod config;
pub mod counter;
pub mod incremental;
pub mod report;
pub mod trainer;

pub use config::{TrainingConfig, TrainingConfigBuilder, TrainingStrategy};
pub use counter::{adjacent_pairs, compute_pair_frequencies, PairCounts};
pub use incremental::PairIndex;
pub use report::{StopReason, TrainingReport};
pub use trainer::{BpeTrainer, PairStatistics, Recount, TrainedModel};
