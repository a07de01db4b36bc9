//! Greedy longest-match segmentation.
//!
//! Each word is cut left to right. At every position the longest substring
//! that is a merge output wins; if none is, the single character at the
//! cursor is emitted. This is not canonical BPE, which would replay merges
//! in rank order over a character-level split.

use pairfuse_core::{split_words, MergeTable};
use std::iter::once;

/// Encoder that splits text into subword tokens.
#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'a> {
    merges: &'a MergeTable,
}

impl<'a> Segmenter<'a> {
    /// Create a segmenter over a merge table.
    pub fn new(merges: &'a MergeTable) -> Self {
        Self { merges }
    }

    /// Encode every whitespace-delimited word and concatenate the results.
    ///
    /// Word boundaries are not kept in the output.
    pub fn encode(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in split_words(text) {
            self.encode_word_into(word, &mut tokens);
        }
        tokens
    }

    /// Encode a single word.
    pub fn encode_word(&self, word: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        self.encode_word_into(word, &mut tokens);
        tokens
    }

    fn encode_word_into(&self, word: &str, tokens: &mut Vec<String>) {
        if self.merges.contains_output(word) {
            tokens.push(word.to_string());
            return;
        }

        // Byte offset of every char boundary, including the end of the word.
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(once(word.len()))
            .collect();
        let char_count = bounds.len() - 1;
        let max_len = self.merges.max_output_chars();

        let mut cursor = 0;
        while cursor < char_count {
            let start = bounds[cursor];
            let longest = char_count.min(cursor + max_len);

            let matched = (cursor + 1..=longest)
                .rev()
                .find(|&end| self.merges.contains_output(&word[start..bounds[end]]));

            let end = matched.unwrap_or(cursor + 1);
            tokens.push(word[start..bounds[end]].to_string());
            cursor = end;
        }
    }
}
