//! Merge rule management.
//!
//! The merge table records, in learning order, which adjacent symbol pairs
//! were fused and what token they produced. Rank 0 is the first merge learned.
//! Encoding and decoding only ask whether a string is one of the produced
//! tokens, so the table also keeps a set of outputs for that lookup.

use super::split::SEPARATOR;
use crate::error::{Result, TokenizerError};
use ahash::{AHashMap, AHashSet};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A pair of adjacent symbols.
pub type Pair = (CompactString, CompactString);

/// A single learned merge: `pair.0` followed by `pair.1` becomes `token`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergeRule {
    pub pair: Pair,
    pub token: CompactString,
}

impl MergeRule {
    /// Build the rule for a pair; the token is the plain concatenation.
    pub fn new(first: &str, second: &str) -> Self {
        let mut token = CompactString::with_capacity(first.len() + second.len());
        token.push_str(first);
        token.push_str(second);
        Self {
            pair: (CompactString::new(first), CompactString::new(second)),
            token,
        }
    }

    /// Textual form of the pair, `"first second"`.
    pub fn key(&self) -> String {
        format!("{}{}{}", self.pair.0, SEPARATOR, self.pair.1)
    }

    /// Check that the rule is well formed.
    pub fn validate(&self) -> Result<()> {
        let (first, second) = &self.pair;
        for symbol in [first, second] {
            if symbol.is_empty() || symbol.chars().any(char::is_whitespace) {
                return Err(TokenizerError::InvalidMerge(format!(
                    "symbol {:?} in pair ({:?}, {:?}) is empty or contains whitespace",
                    symbol, first, second
                )));
            }
        }
        if self.token.len() != first.len() + second.len()
            || !self.token.starts_with(first.as_str())
            || !self.token.ends_with(second.as_str())
        {
            return Err(TokenizerError::InvalidMerge(format!(
                "{} -> {} is not a concatenation",
                self.key(),
                self.token
            )));
        }
        Ok(())
    }
}

/// Append-only table of merge rules in learning order.
#[derive(Debug, Clone, Default)]
pub struct MergeTable {
    /// Rules indexed by rank
    rules: Vec<MergeRule>,
    /// Pair -> rank
    ranks: AHashMap<Pair, u32>,
    /// Every token produced by some merge
    outputs: AHashSet<CompactString>,
    /// Length in chars of the longest output
    max_output_chars: usize,
}

impl MergeTable {
    /// Create an empty merge table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the merge of `first` and `second`.
    ///
    /// Returns the rank of the new rule, or `None` if the pair was already
    /// recorded. Existing rules are never overwritten.
    pub fn record(&mut self, first: &str, second: &str) -> Option<u32> {
        self.push(MergeRule::new(first, second))
    }

    /// Append an already-built rule, validating it first.
    ///
    /// Duplicate pairs are an error here, since a table rebuilt from a
    /// snapshot must match the one that was captured.
    pub fn try_push(&mut self, rule: MergeRule) -> Result<u32> {
        rule.validate()?;
        let key = rule.key();
        self.push(rule)
            .ok_or_else(|| TokenizerError::InvalidMerge(format!("duplicate pair {}", key)))
    }

    fn push(&mut self, rule: MergeRule) -> Option<u32> {
        if self.ranks.contains_key(&rule.pair) {
            return None;
        }
        let rank = self.rules.len() as u32;
        self.max_output_chars = self.max_output_chars.max(rule.token.chars().count());
        self.ranks.insert(rule.pair.clone(), rank);
        self.outputs.insert(rule.token.clone());
        self.rules.push(rule);
        Some(rank)
    }

    /// Whether `token` was produced by some merge.
    #[inline]
    pub fn contains_output(&self, token: &str) -> bool {
        self.outputs.contains(token)
    }

    /// Output token for a pair, if it was merged.
    pub fn get(&self, first: &str, second: &str) -> Option<&str> {
        self.rank(first, second)
            .map(|rank| self.rules[rank as usize].token.as_str())
    }

    /// Rank of a pair, if it was merged.
    pub fn rank(&self, first: &str, second: &str) -> Option<u32> {
        let pair = (CompactString::new(first), CompactString::new(second));
        self.ranks.get(&pair).copied()
    }

    /// Rules in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

    /// Rules rendered as `("first second", "firstsecond")`, in rank order.
    pub fn rendered(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.rules.iter().map(|rule| (rule.key(), rule.token.as_str()))
    }

    /// Length in chars of the longest output token, 0 when empty.
    #[inline]
    pub fn max_output_chars(&self) -> usize {
        self.max_output_chars
    }

    /// Mean length in chars of the output tokens, `None` when no merges exist.
    pub fn average_output_chars(&self) -> Option<f64> {
        if self.rules.is_empty() {
            return None;
        }
        let total: usize = self.rules.iter().map(|r| r.token.chars().count()).sum();
        Some(total as f64 / self.rules.len() as f64)
    }

    /// Number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record() {
        let mut table = MergeTable::new();
        assert_eq!(table.record("a", "a"), Some(0));
        assert_eq!(table.record("aa", "b"), Some(1));

        assert_eq!(table.get("a", "a"), Some("aa"));
        assert_eq!(table.get("aa", "b"), Some("aab"));
        assert_eq!(table.get("b", "b"), None);
        assert_eq!(table.rank("aa", "b"), Some(1));
        assert!(table.contains_output("aab"));
        assert!(!table.contains_output("a"));
    }

    #[test]
    fn test_record_never_overwrites() {
        let mut table = MergeTable::new();
        table.record("a", "b");
        table.record("c", "d");
        assert_eq!(table.record("a", "b"), None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rank("a", "b"), Some(0));
    }

    #[test]
    fn test_rendered_in_rank_order() {
        let mut table = MergeTable::new();
        table.record("t", "h");
        table.record("th", "e");

        let rendered: Vec<(String, &str)> = table.rendered().collect();
        assert_eq!(
            rendered,
            vec![("t h".to_string(), "th"), ("th e".to_string(), "the")]
        );
    }

    #[test]
    fn test_average_output_chars() {
        let mut table = MergeTable::new();
        assert_eq!(table.average_output_chars(), None);

        table.record("a", "a");
        table.record("aa", "aa");
        assert_eq!(table.average_output_chars(), Some(3.0));
        assert_eq!(table.max_output_chars(), 4);
    }

    #[test]
    fn test_lengths_count_chars() {
        let mut table = MergeTable::new();
        table.record("é", "é");
        assert_eq!(table.max_output_chars(), 2);
        assert_eq!(table.average_output_chars(), Some(2.0));
    }

    #[test]
    fn test_try_push_validates() {
        let mut table = MergeTable::new();
        assert!(table.try_push(MergeRule::new("a", "b")).is_ok());

        let bogus = MergeRule {
            pair: ("a".into(), "c".into()),
            token: "ca".into(),
        };
        assert!(matches!(
            table.try_push(bogus),
            Err(TokenizerError::InvalidMerge(_))
        ));

        let spaced = MergeRule::new("a b", "c");
        assert!(table.try_push(spaced).is_err());

        assert!(table.try_push(MergeRule::new("a", "b")).is_err());
        assert_eq!(table.len(), 1);
    }
}
