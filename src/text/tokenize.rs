//! Whitespace tokenizers for comment text.
//!
//! Two flavours are used by the feature pipeline:
//!
//! - [`normalize_and_split`] lower-cases and splits on whitespace. Punctuation
//!   stays attached to words (`"great!"` and `"great"` are distinct tokens).
//!   The vocabulary and the per-comment vocabulary counts use this form.
//! - [`strip_punctuation_and_split`] first deletes a fixed set of punctuation
//!   characters, then applies the same split. It feeds the word-count and
//!   repeated-word features.

use std::collections::HashSet;

/// Characters removed by [`strip_punctuation_and_split`].
pub const STRIPPED_PUNCTUATION: [char; 8] = [';', '.', '!', '?', ',', ':', '(', ')'];

/// Lower-case `text` and split it on runs of whitespace.
pub fn normalize_and_split(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Tokens of a punctuation-stripped comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrippedTokens {
    /// Every token, in order, duplicates kept.
    pub tokens: Vec<String>,
    /// The distinct tokens.
    pub unique: HashSet<String>,
}

impl StrippedTokens {
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn unique_count(&self) -> usize {
        self.unique.len()
    }

    /// Occurrences beyond the first of every token.
    pub fn repeated_count(&self) -> usize {
        self.tokens.len() - self.unique.len()
    }
}

/// Remove [`STRIPPED_PUNCTUATION`] (no replacement) and split like
/// [`normalize_and_split`].
pub fn strip_punctuation_and_split(text: &str) -> StrippedTokens {
    let stripped: String = text
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    let tokens = normalize_and_split(&stripped);
    let unique = tokens.iter().cloned().collect();
    StrippedTokens { tokens, unique }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_keeps_punctuation() {
        let tokens = normalize_and_split("  The CAT sat.\tOn\nthe mat!  ");
        assert_eq!(tokens, vec!["the", "cat", "sat.", "on", "the", "mat!"]);
    }

    #[test]
    fn empty_and_blank_text_yield_no_tokens() {
        assert!(normalize_and_split("").is_empty());
        assert!(normalize_and_split(" \t\n ").is_empty());

        let stripped = strip_punctuation_and_split("   ");
        assert_eq!(stripped.word_count(), 0);
        assert_eq!(stripped.unique_count(), 0);
        assert_eq!(stripped.repeated_count(), 0);
    }

    #[test]
    fn strip_removes_listed_punctuation_without_replacement() {
        let stripped = strip_punctuation_and_split("Wait...what?! (really), yes:no; ok");
        assert_eq!(stripped.tokens, vec!["waitwhat", "really", "yesno", "ok"]);
    }

    #[test]
    fn strip_keeps_other_symbols() {
        let stripped = strip_punctuation_and_split("it's a-ok \"quoted\"");
        assert_eq!(stripped.tokens, vec!["it's", "a-ok", "\"quoted\""]);
    }

    #[test]
    fn unique_is_a_deduplicated_subset() {
        let samples = [
            "the the the end",
            "A a. A! b",
            "one two three",
            "x, x; (x) y: y?",
        ];
        for text in samples {
            let stripped = strip_punctuation_and_split(text);
            assert!(stripped.unique.len() <= stripped.tokens.len());
            for token in &stripped.unique {
                assert!(stripped.tokens.contains(token));
            }
            let distinct: HashSet<&String> = stripped.tokens.iter().collect();
            assert_eq!(distinct.len(), stripped.unique.len());
        }
    }

    #[test]
    fn repeated_count_counts_extra_occurrences() {
        let stripped = strip_punctuation_and_split("a a a b b c");
        assert_eq!(stripped.word_count(), 6);
        assert_eq!(stripped.unique_count(), 3);
        assert_eq!(stripped.repeated_count(), 3);
    }
}
