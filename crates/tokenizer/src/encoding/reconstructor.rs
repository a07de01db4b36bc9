//! Token sequence -> text.
//!
//! A token that is a merge output is emitted as a word on its own. Any other
//! token starts a raw fragment, which absorbs the following tokens for as
//! long as they are merge outputs. Words are joined with single spaces.
//!
//! The same membership test serves two roles here, so decoding is not the
//! inverse of [`Segmenter`](super::Segmenter): `["b", "b"]` decodes to
//! `"b b"`, not `"bb"`.

use pairfuse_core::MergeTable;

/// Decoder that glues tokens back into text.
#[derive(Debug, Clone, Copy)]
pub struct Reconstructor<'a> {
    merges: &'a MergeTable,
}

impl<'a> Reconstructor<'a> {
    /// Create a reconstructor over a merge table.
    pub fn new(merges: &'a MergeTable) -> Self {
        Self { merges }
    }

    /// A token that stands alone as a reconstructed word.
    #[inline]
    pub fn is_known_subword(&self, token: &str) -> bool {
        self.merges.contains_output(token)
    }

    /// A token that extends the raw fragment before it.
    #[inline]
    pub fn continues_fragment(&self, token: &str) -> bool {
        self.merges.contains_output(token)
    }

    /// Decode a token sequence.
    pub fn decode<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        let mut words: Vec<String> = Vec::new();

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i].as_ref();
            i += 1;

            if self.is_known_subword(token) {
                words.push(token.to_string());
                continue;
            }

            let mut fragment = token.to_string();
            while i < tokens.len() && self.continues_fragment(tokens[i].as_ref()) {
                fragment.push_str(tokens[i].as_ref());
                i += 1;
            }
            words.push(fragment);
        }

        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rules: &[(&str, &str)]) -> MergeTable {
        let mut merges = MergeTable::new();
        for (first, second) in rules {
            merges.record(first, second);
        }
        merges
    }

    #[test]
    fn test_known_subword_stands_alone() {
        let merges = table(&[("a", "a")]);
        let decoder = Reconstructor::new(&merges);
        assert_eq!(decoder.decode(&["aa"]), "aa");
        assert_eq!(decoder.decode(&["aa", "aa"]), "aa aa");
    }

    #[test]
    fn test_raw_chars_are_not_glued() {
        let merges = table(&[("a", "a")]);
        let decoder = Reconstructor::new(&merges);
        assert_eq!(decoder.decode(&["b", "b"]), "b b");
    }

    #[test]
    fn test_fragment_absorbs_known_subwords() {
        let merges = table(&[("a", "a"), ("e", "r")]);
        let decoder = Reconstructor::new(&merges);

        assert_eq!(decoder.decode(&["b", "aa", "er", "c"]), "baaer c");
        assert_eq!(decoder.decode(&["aa", "b", "aa"]), "aa baa");
    }

    #[test]
    fn test_empty_sequence() {
        let merges = table(&[("a", "a")]);
        let decoder = Reconstructor::new(&merges);
        let empty: [&str; 0] = [];
        assert_eq!(decoder.decode(&empty), "");
    }

    #[test]
    fn test_untrained_table_keeps_every_token_separate() {
        let merges = MergeTable::new();
        let decoder = Reconstructor::new(&merges);
        let tokens = vec!["x".to_string(), "y".to_string()];
        assert_eq!(decoder.decode(&tokens), "x y");
    }
}
