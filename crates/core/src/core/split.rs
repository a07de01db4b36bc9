//! Word splitting and segmentation helpers.
//!
//! Words are whitespace-delimited, so a single ASCII space can never occur
//! inside a word. That makes it safe to use as the separator between the
//! symbols of a segmentation.

use compact_str::CompactString;

/// Separator between symbols in a segmentation key.
pub const SEPARATOR: char = ' ';

/// Split a line of text into words on any run of Unicode whitespace.
#[inline]
pub fn split_words(text: &str) -> std::str::SplitWhitespace<'_> {
    text.split_whitespace()
}

/// Iterate over the symbols of a segmentation key.
#[inline]
pub fn symbols(segmentation: &str) -> std::str::Split<'_, char> {
    segmentation.split(SEPARATOR)
}

/// Character-level segmentation of a word: one symbol per `char`.
pub fn char_segmentation(word: &str) -> CompactString {
    join_symbols(word.chars().map(|c| {
        let mut buf = [0u8; 4];
        CompactString::new(c.encode_utf8(&mut buf))
    }))
}

/// Join symbols with the separator.
pub fn join_symbols<I, S>(symbols: I) -> CompactString
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = CompactString::default();
    for (i, symbol) in symbols.into_iter().enumerate() {
        if i > 0 {
            joined.push(SEPARATOR);
        }
        joined.push_str(symbol.as_ref());
    }
    joined
}

/// The word a segmentation spells, with separators removed.
pub fn surface(segmentation: &str) -> String {
    symbols(segmentation).collect()
}
