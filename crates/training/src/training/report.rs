//! Training outcome reporting.

use std::fmt;

/// Why the merge loop stopped. All variants are normal termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The vocabulary reached the target number of distinct entries
    VocabSizeReached,
    /// No adjacent pairs are left to merge
    NoPairsRemaining,
    /// The most frequent pair is below the minimum frequency
    BelowMinFrequency { best_frequency: u64 },
    /// The merge budget was used up
    MergeBudgetExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VocabSizeReached => write!(f, "vocab size reached"),
            Self::NoPairsRemaining => write!(f, "no pairs remaining"),
            Self::BelowMinFrequency { best_frequency } => {
                write!(f, "best pair frequency {} below minimum", best_frequency)
            }
            Self::MergeBudgetExhausted => write!(f, "merge budget exhausted"),
        }
    }
}

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingReport {
    /// Merges applied to the vocabulary
    pub merges_performed: usize,
    /// Why training stopped
    pub stop_reason: StopReason,
    /// Distinct entries after character-level seeding
    pub initial_vocab_entries: usize,
    /// Distinct entries when training stopped
    pub final_vocab_entries: usize,
}
