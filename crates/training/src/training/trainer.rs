//! Merge trainer.
//!
//! Seeds a character-level vocabulary from the corpus, then repeatedly fuses
//! the most frequent adjacent pair until one of the stopping conditions
//! holds: the vocabulary has enough distinct entries, no pairs remain, the
//! best pair is below the minimum frequency, or the merge budget runs out.

use super::config::{TrainingConfig, TrainingStrategy};
use super::counter::compute_pair_frequencies;
use super::incremental::PairIndex;
use super::report::{StopReason, TrainingReport};
use pairfuse_core::{best_pair, MergeCandidate, MergeTable, Pair, Result, Vocabulary};

/// Source of pair frequencies for the merge loop.
pub trait PairStatistics {
    /// Highest-priority pair over the current vocabulary, if any.
    fn best(&mut self, vocab: &Vocabulary) -> Option<MergeCandidate>;

    /// Rewrite the vocabulary so that every `pair` becomes `token`.
    fn merge(&mut self, vocab: &mut Vocabulary, pair: &Pair, token: &str);
}

/// Recounts all pairs on every call and rewrites every entry on merge.
#[derive(Debug, Default)]
pub struct Recount;

impl PairStatistics for Recount {
    fn best(&mut self, vocab: &Vocabulary) -> Option<MergeCandidate> {
        best_pair(&compute_pair_frequencies(vocab))
    }

    fn merge(&mut self, vocab: &mut Vocabulary, pair: &Pair, token: &str) {
        vocab.apply_merge(pair, token);
    }
}

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    /// Final word segmentations
    pub vocab: Vocabulary,
    /// Learned merges in rank order
    pub merges: MergeTable,
    /// How the run went
    pub report: TrainingReport,
}

/// Pair-merge trainer.
#[derive(Debug, Clone)]
pub struct BpeTrainer {
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a trainer, validating the configuration.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a trainer with the given targets and default remaining settings.
    pub fn with_targets(vocab_size: usize, max_merges: usize) -> Result<Self> {
        Self::new(TrainingConfig::new(vocab_size, max_merges))
    }

    /// The trainer's configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on a corpus of text lines.
    pub fn train<I, S>(&self, corpus: I) -> TrainedModel
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocab = Vocabulary::from_corpus(corpus);
        log::info!(
            "Seeded vocabulary: {} distinct words, {} occurrences",
            vocab.len(),
            vocab.total_frequency()
        );
        self.train_vocab(vocab)
    }

    /// Train starting from an already seeded vocabulary.
    pub fn train_vocab(&self, mut vocab: Vocabulary) -> TrainedModel {
        let mut merges = MergeTable::new();
        let initial_vocab_entries = vocab.len();

        log::info!(
            "Starting merge loop: target {} entries, at most {} merges ({:?})",
            self.config.vocab_size,
            self.config.max_merges,
            self.config.strategy
        );

        let (merges_performed, stop_reason) = match self.config.strategy {
            TrainingStrategy::Recompute => self.run(&mut Recount, &mut vocab, &mut merges),
            TrainingStrategy::Incremental => {
                let mut index = PairIndex::build(&vocab);
                self.run(&mut index, &mut vocab, &mut merges)
            }
        };

        log::info!(
            "Finished training: {} merges completed, stopped: {}",
            merges_performed,
            stop_reason
        );

        let report = TrainingReport {
            merges_performed,
            stop_reason,
            initial_vocab_entries,
            final_vocab_entries: vocab.len(),
        };

        TrainedModel {
            vocab,
            merges,
            report,
        }
    }

    fn run<P: PairStatistics>(
        &self,
        stats: &mut P,
        vocab: &mut Vocabulary,
        merges: &mut MergeTable,
    ) -> (usize, StopReason) {
        let max_merges = self.config.max_merges;
        let mut last_log_percent = 0;

        for done in 0..max_merges {
            if vocab.len() >= self.config.vocab_size {
                return (done, StopReason::VocabSizeReached);
            }

            let Some(best) = stats.best(vocab) else {
                return (done, StopReason::NoPairsRemaining);
            };

            if best.count < self.config.min_frequency {
                return (
                    done,
                    StopReason::BelowMinFrequency {
                        best_frequency: best.count,
                    },
                );
            }

            let (first, second) = &best.pair;
            if merges.record(first, second).is_none() {
                log::warn!(
                    "Pair ({}, {}) merged again; keeping its first rank",
                    first,
                    second
                );
            }
            let token = format!("{}{}", first, second);
            stats.merge(vocab, &best.pair, &token);

            log::debug!(
                "Merge {}: ({}, {}) -> {} (frequency: {})",
                done + 1,
                first,
                second,
                token,
                best.count
            );

            let percent = (done + 1) * 100 / max_merges;
            if percent > last_log_percent {
                log::info!("Progress: {}% ({}/{} merges)", percent, done + 1, max_merges);
                last_log_percent = percent;
            }
        }

        (max_merges, StopReason::MergeBudgetExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> Pair {
        (a.into(), b.into())
    }

    fn trainer(vocab_size: usize, max_merges: usize, strategy: TrainingStrategy) -> BpeTrainer {
        BpeTrainer::new(
            TrainingConfig::builder()
                .vocab_size(vocab_size)
                .max_merges(max_merges)
                .strategy(strategy)
                .build()
                .unwrap(),
        )
        .unwrap()
    }

    fn rules(merges: &MergeTable) -> Vec<(String, String)> {
        merges
            .iter()
            .map(|rule| (rule.key(), rule.token.to_string()))
            .collect()
    }

    #[test]
    fn test_singleton_pair_stops_training() {
        let model = BpeTrainer::with_targets(100, 10).unwrap().train(["aa aa bb"]);

        assert_eq!(model.vocab.get("aa"), Some(2));
        assert_eq!(model.vocab.get("b b"), Some(1));
        assert_eq!(rules(&model.merges), vec![("a a".to_string(), "aa".to_string())]);
        assert_eq!(model.report.merges_performed, 1);
        assert_eq!(
            model.report.stop_reason,
            StopReason::BelowMinFrequency { best_frequency: 1 }
        );
    }

    #[test]
    fn test_zero_budget_keeps_seed() {
        let model = BpeTrainer::with_targets(100, 0).unwrap().train(["low lower lowest"]);

        assert!(model.merges.is_empty());
        assert_eq!(model.vocab, Vocabulary::from_corpus(["low lower lowest"]));
        assert_eq!(model.report.stop_reason, StopReason::MergeBudgetExhausted);
    }

    #[test]
    fn test_empty_corpus() {
        let empty: [&str; 0] = [];
        let model = BpeTrainer::with_targets(100, 10).unwrap().train(empty);

        assert!(model.vocab.is_empty());
        assert!(model.merges.is_empty());
        assert_eq!(model.report.merges_performed, 0);
        assert_eq!(model.report.stop_reason, StopReason::NoPairsRemaining);
    }

    #[test]
    fn test_vocab_size_reached_before_merging() {
        let model = BpeTrainer::with_targets(2, 10).unwrap().train(["low low newer newer"]);

        assert_eq!(model.report.stop_reason, StopReason::VocabSizeReached);
        assert_eq!(model.report.merges_performed, 0);
        assert!(model.vocab.len() >= 2);
    }

    #[test]
    fn test_budget_limits_merges() {
        let model = BpeTrainer::with_targets(100, 2)
            .unwrap()
            .train(["hello hello hello help help"]);

        assert_eq!(model.report.merges_performed, 2);
        assert_eq!(model.merges.len(), 2);
        assert_eq!(model.report.stop_reason, StopReason::MergeBudgetExhausted);
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        // (a,b), (b,c) and (c,d) all occur twice; "a b" sorts first.
        let model = BpeTrainer::with_targets(100, 1).unwrap().train(["abcd abcd"]);
        assert_eq!(model.merges.get("a", "b"), Some("ab"));
        assert_eq!(model.vocab.get("ab c d"), Some(2));
    }

    #[test]
    fn test_learns_common_prefix() {
        let model = BpeTrainer::with_targets(100, 3)
            .unwrap()
            .train(["hello hello hello help help"]);

        // (e,l) and (h,e) both occur five times; "e l" sorts first.
        assert_eq!(model.merges.rank("e", "l"), Some(0));
        assert_eq!(model.merges.rank("h", "el"), Some(1));
        assert_eq!(model.merges.rank("hel", "l"), Some(2));
        assert_eq!(model.vocab.segmentation_of("hello"), Some("hell o"));
        assert_eq!(model.vocab.segmentation_of("help"), Some("hel p"));
    }

    #[test]
    fn test_min_frequency() {
        let config = TrainingConfig::builder()
            .vocab_size(100)
            .max_merges(10)
            .min_frequency(3)
            .build()
            .unwrap();
        let model = BpeTrainer::new(config).unwrap().train(["ab ab cd cd cd"]);

        assert_eq!(model.merges.len(), 1);
        assert_eq!(model.merges.get("c", "d"), Some("cd"));
        assert_eq!(
            model.report.stop_reason,
            StopReason::BelowMinFrequency { best_frequency: 2 }
        );
    }

    #[test]
    fn test_strategies_agree() {
        let corpus = [
            "the quick brown fox jumps over the lazy dog",
            "the dog barks and the fox runs",
            "brown dogs and brown foxes are quick",
        ];
        let a = trainer(1_000, 50, TrainingStrategy::Recompute).train(corpus);
        let b = trainer(1_000, 50, TrainingStrategy::Incremental).train(corpus);

        assert_eq!(rules(&a.merges), rules(&b.merges));
        assert_eq!(a.vocab, b.vocab);
        assert_eq!(a.report, b.report);
        assert!(!a.merges.is_empty());
    }

    #[test]
    fn test_incremental_matches_recount_pairs() {
        let mut vocab = Vocabulary::from_corpus(["banana bandana ban"]);
        let mut index = PairIndex::build(&vocab);
        index.merge(&mut vocab, &pair("a", "n"), "an");

        let mut recount = Recount;
        assert_eq!(index.best(&vocab), recount.best(&vocab));
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(BpeTrainer::with_targets(0, 10).is_err());
    }

    mod properties {
        use super::*;
        use pairfuse_core::surface;
        use proptest::prelude::*;

        fn corpus() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec("[abcé日]{1,6}( [abcé日]{1,6}){0,5}", 1..5)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn prop_characters_are_conserved(lines in corpus(), merges in 0usize..20) {
                let model = BpeTrainer::with_targets(10_000, merges).unwrap().train(&lines);
                for line in &lines {
                    for word in line.split_whitespace() {
                        let segmentation = model.vocab.segmentation_of(word);
                        prop_assert!(segmentation.is_some(), "no entry for {:?}", word);
                        prop_assert_eq!(surface(segmentation.unwrap()), word);
                    }
                }
                let seeded = Vocabulary::from_corpus(&lines);
                prop_assert_eq!(model.vocab.total_frequency(), seeded.total_frequency());
                prop_assert!(model.vocab.len() <= seeded.len());
            }

            #[test]
            fn prop_merge_table_only_grows(lines in corpus(), merges in 0usize..15) {
                let shorter = BpeTrainer::with_targets(10_000, merges).unwrap().train(&lines);
                let longer = BpeTrainer::with_targets(10_000, merges + 1).unwrap().train(&lines);

                prop_assert!(shorter.report.merges_performed <= merges);
                let prefix = rules(&shorter.merges);
                let extended = rules(&longer.merges);
                prop_assert!(extended.len() >= prefix.len());
                prop_assert_eq!(&extended[..prefix.len()], &prefix[..]);
            }

            #[test]
            fn prop_strategies_agree(lines in corpus(), merges in 0usize..20) {
                let a = trainer(10_000, merges, TrainingStrategy::Recompute).train(&lines);
                let b = trainer(10_000, merges, TrainingStrategy::Incremental).train(&lines);
                prop_assert_eq!(rules(&a.merges), rules(&b.merges));
                prop_assert_eq!(a.vocab, b.vocab);
                prop_assert_eq!(a.report, b.report);
            }
        }
    }
}
