//! Summary statistics of a tokenizer's state.

use serde::{Deserialize, Serialize};

/// Counts describing a tokenizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizerStats {
    /// Distinct word segmentations in the vocabulary
    pub distinct_vocabulary_entries: usize,
    /// Rules in the merge table
    pub merges_performed: usize,
    /// Mean length in chars of the merge outputs; `None` until a merge exists
    pub average_merged_token_length: Option<f64>,
}

impl TokenizerStats {
    /// Whether any merge has been learned.
    pub fn is_trained(&self) -> bool {
        self.merges_performed > 0
    }
}
