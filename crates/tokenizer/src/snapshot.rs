//! Snapshot types for handing trained state to a persistence layer.
//!
//! The crate does no I/O itself. A snapshot is a plain serde structure that
//! the caller can write in whatever format it prefers, and later turn back
//! into a tokenizer.

use pairfuse_core::{symbols, MergeRule, MergeTable, Result, TokenizerError, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A merge rule in serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedMerge {
    /// The pair of symbols being merged
    pub pair: (String, String),
    /// Learning order, 0 first
    pub rank: u32,
    /// The token produced by the merge
    pub token: String,
}

/// Complete tokenizer state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerSnapshot {
    /// Format version
    pub version: String,
    /// Segmentation -> frequency, sorted by segmentation
    pub vocabulary: BTreeMap<String, u64>,
    /// Merge rules in rank order
    pub merges: Vec<SerializedMerge>,
}

impl TokenizerSnapshot {
    /// Capture a vocabulary and merge table.
    pub fn capture(vocab: &Vocabulary, merges: &MergeTable) -> Self {
        let vocabulary = vocab
            .iter()
            .map(|(segmentation, freq)| (segmentation.to_string(), freq))
            .collect();

        let merges = merges
            .iter()
            .enumerate()
            .map(|(rank, rule)| SerializedMerge {
                pair: (rule.pair.0.to_string(), rule.pair.1.to_string()),
                rank: rank as u32,
                token: rule.token.to_string(),
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            vocabulary,
            merges,
        }
    }

    /// Rebuild the vocabulary and merge table, checking their invariants.
    pub fn restore(&self) -> Result<(Vocabulary, MergeTable)> {
        let mut vocab = Vocabulary::with_capacity(self.vocabulary.len());
        for (segmentation, &freq) in &self.vocabulary {
            validate_segmentation(segmentation, freq)?;
            vocab.add_entry(segmentation.as_str().into(), freq);
        }

        let mut merges = MergeTable::new();
        for (expected, merge) in self.merges.iter().enumerate() {
            if merge.rank as usize != expected {
                return Err(TokenizerError::InvalidSnapshot(format!(
                    "merge {} {} has rank {}, expected {}",
                    merge.pair.0, merge.pair.1, merge.rank, expected
                )));
            }
            merges.try_push(MergeRule {
                pair: (merge.pair.0.as_str().into(), merge.pair.1.as_str().into()),
                token: merge.token.as_str().into(),
            })?;
        }

        Ok((vocab, merges))
    }
}

fn validate_segmentation(segmentation: &str, freq: u64) -> Result<()> {
    if freq == 0 {
        return Err(TokenizerError::InvalidSnapshot(format!(
            "entry {:?} has zero frequency",
            segmentation
        )));
    }
    let malformed = symbols(segmentation)
        .any(|symbol| symbol.is_empty() || symbol.chars().any(char::is_whitespace));
    if malformed {
        return Err(TokenizerError::InvalidSnapshot(format!(
            "entry {:?} has an empty or whitespace symbol",
            segmentation
        )));
    }
    Ok(())
}
