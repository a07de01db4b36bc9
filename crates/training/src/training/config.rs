//! Training configuration.

use pairfuse_core::{Result, TokenizerError};

/// How pair frequencies are maintained between merges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrainingStrategy {
    /// Recount every pair and rewrite the whole vocabulary on each merge.
    #[default]
    Recompute,
    /// Keep a pair -> entries index and a priority queue, touching only the
    /// entries that contain the merged pair.
    Incremental,
}

/// Configuration for merge training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Stop once the vocabulary has at least this many distinct entries
    pub vocab_size: usize,
    /// Maximum number of merges to perform
    pub max_merges: usize,
    /// Stop when the best pair occurs fewer times than this
    pub min_frequency: u64,
    /// Pair statistics strategy
    pub strategy: TrainingStrategy,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 30_000,
            max_merges: 5_000,
            min_frequency: 2,
            strategy: TrainingStrategy::default(),
        }
    }
}

impl TrainingConfig {
    /// Configuration with the given targets and default remaining fields.
    pub fn new(vocab_size: usize, max_merges: usize) -> Self {
        Self {
            vocab_size,
            max_merges,
            ..Default::default()
        }
    }

    /// Create a configuration builder.
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::new()
    }

    /// Check the configuration.
    ///
    /// `max_merges` may be zero, which leaves the vocabulary at its
    /// character-level seed.
    pub fn validate(&self) -> Result<()> {
        if self.vocab_size == 0 {
            return Err(TokenizerError::InvalidConfig(
                "vocab_size must be positive".to_string(),
            ));
        }
        if self.min_frequency == 0 {
            return Err(TokenizerError::InvalidConfig(
                "min_frequency must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`TrainingConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Set the merge budget.
    pub fn max_merges(mut self, merges: usize) -> Self {
        self.config.max_merges = merges;
        self
    }

    /// Set the minimum frequency for a merge.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Set the pair statistics strategy.
    pub fn strategy(mut self, strategy: TrainingStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<TrainingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
