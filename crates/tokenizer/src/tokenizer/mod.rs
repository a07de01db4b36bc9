//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that owns the
//! vocabulary and merge table, trains them, and encodes and decodes text
//! against them.

pub mod stats;

pub use stats::TokenizerStats;

use crate::encoding::{Reconstructor, Segmenter};
use crate::snapshot::TokenizerSnapshot;
use pairfuse_core::{MergeTable, Result, Vocabulary};
use pairfuse_training::{BpeTrainer, TrainingConfig, TrainingReport};

/// Pair-merge subword tokenizer.
///
/// Owns its vocabulary and merge table exclusively. Training replaces both;
/// encoding and decoding only read the merge table.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    /// Word segmentations with corpus frequencies
    vocab: Vocabulary,
    /// Learned merges in rank order
    merges: MergeTable,
    /// Report of the most recent training run
    last_report: Option<TrainingReport>,
}

impl Tokenizer {
    /// Create an untrained tokenizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tokenizer from a snapshot.
    pub fn from_snapshot(snapshot: &TokenizerSnapshot) -> Result<Self> {
        let (vocab, merges) = snapshot.restore()?;
        Ok(Self {
            vocab,
            merges,
            last_report: None,
        })
    }

    /// Train on a corpus of text lines.
    ///
    /// Stops after `max_merges` merges, or earlier once the vocabulary has
    /// `vocab_size` distinct entries, no pairs remain, or the best pair
    /// occurs only once. Any previous state is discarded first.
    pub fn train<I, S>(
        &mut self,
        corpus: I,
        vocab_size: usize,
        max_merges: usize,
    ) -> Result<TrainingReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.train_with_config(corpus, TrainingConfig::new(vocab_size, max_merges))
    }

    /// Train with a full training configuration.
    pub fn train_with_config<I, S>(
        &mut self,
        corpus: I,
        config: TrainingConfig,
    ) -> Result<TrainingReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trainer = BpeTrainer::new(config)?;
        let model = trainer.train(corpus);

        self.vocab = model.vocab;
        self.merges = model.merges;
        self.last_report = Some(model.report.clone());

        Ok(model.report)
    }

    /// Encode text into subword tokens.
    pub fn encode(&self, text: &str) -> Vec<String> {
        Segmenter::new(&self.merges).encode(text)
    }

    /// Encode a single word into subword tokens.
    pub fn encode_word(&self, word: &str) -> Vec<String> {
        Segmenter::new(&self.merges).encode_word(word)
    }

    /// Decode a token sequence back into text.
    pub fn decode<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        Reconstructor::new(&self.merges).decode(tokens)
    }

    /// Read-only view of the vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Read-only view of the merge table.
    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }

    /// Report of the most recent training run, if any.
    pub fn last_report(&self) -> Option<&TrainingReport> {
        self.last_report.as_ref()
    }

    /// Whether any merge has been learned.
    pub fn is_trained(&self) -> bool {
        !self.merges.is_empty()
    }

    /// Summary statistics. Safe to call before training.
    pub fn stats(&self) -> TokenizerStats {
        TokenizerStats {
            distinct_vocabulary_entries: self.vocab.len(),
            merges_performed: self.merges.len(),
            average_merged_token_length: self.merges.average_output_chars(),
        }
    }

    /// Capture the vocabulary and merge table for persistence.
    pub fn snapshot(&self) -> TokenizerSnapshot {
        TokenizerSnapshot::capture(&self.vocab, &self.merges)
    }
}
