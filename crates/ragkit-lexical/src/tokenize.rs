//! Shared tokenization for the lexical and vector indexes.
//!
//! Both index types must tokenize identically, otherwise a query term
//! could match in one space and not the other for spurious reasons. The
//! options used at build time travel with the snapshot so query-time
//! tokenization always agrees with it.

use serde::{Deserialize, Serialize};

/// English stop words, applied only when `remove_stopwords` is set.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "is", "it", "in", "on", "at", "to", "for", "of", "and", "or", "but",
    "with", "by", "from", "be", "are",
];

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenizerOptions {
    pub remove_stopwords: bool,
}

/// Lowercase and split on non-alphanumeric boundaries. Empty segments
/// are dropped; stop words only when the flag is set.
pub fn tokenize(text: &str, options: TokenizerOptions) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .filter(|t| !options.remove_stopwords || !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_alphanumeric_and_lowercases() {
        let tokens = tokenize("Hello, World! x86_64", TokenizerOptions::default());
        assert_eq!(tokens, vec!["hello", "world", "x86", "64"]);
    }

    #[test]
    fn stopwords_kept_by_default() {
        let tokens = tokenize("the cat", TokenizerOptions::default());
        assert_eq!(tokens, vec!["the", "cat"]);
    }

    #[test]
    fn stopwords_removed_when_enabled() {
        let tokens = tokenize("the cat and the hat", TokenizerOptions { remove_stopwords: true });
        assert_eq!(tokens, vec!["cat", "hat"]);
    }
}
