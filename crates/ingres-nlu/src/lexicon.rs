//! Word-boundary vocabulary matching over a normalized token stream.
//!
//! Text is lowercased and split on every character that is not part of a word, so
//! "non-monsoon" and "non monsoon" produce the same tokens and "pan" never matches
//! inside "japan". Multi-word entries match as contiguous token runs.

use std::collections::HashSet;

/// Whether `ch` belongs to a word. Devanagari combining marks count as word characters.
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ('\u{0900}'..='\u{097F}').contains(&ch)
}

/// Lowercases `text` and splits it into word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|ch: char| !is_word_char(ch))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A message prepared for repeated vocabulary lookups.
#[derive(Debug, Clone, Default)]
pub struct TokenizedText {
    tokens: Vec<String>,
    words: HashSet<String>,
}

impl TokenizedText {
    /// Tokenizes `text` and indexes its words.
    pub fn new(text: &str) -> Self {
        let tokens = tokenize(text);
        let words = tokens.iter().cloned().collect();
        Self { tokens, words }
    }

    /// Tokens in text order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Whether the single word `word` occurs.
    pub fn contains_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Whether `phrase` occurs as a contiguous run of tokens.
    pub fn contains_phrase(&self, phrase: &[String]) -> bool {
        match phrase {
            [] => false,
            [word] => self.words.contains(word),
            [first, ..] => {
                self.words.contains(first)
                    && self
                        .tokens
                        .windows(phrase.len())
                        .any(|window| window == phrase)
            }
        }
    }
}

/// One vocabulary entry: the label to report and its token sequence.
#[derive(Debug, Clone)]
struct Entry {
    label: &'static str,
    phrase: Vec<String>,
}

/// Ordered word list; earlier entries take priority.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<Entry>,
}

impl Lexicon {
    /// Builds a lexicon from labels, tokenizing each with the same rules as messages.
    pub fn new(labels: &[&'static str]) -> Self {
        let entries = labels
            .iter()
            .map(|&label| Entry {
                label,
                phrase: tokenize(label),
            })
            .filter(|entry| !entry.phrase.is_empty())
            .collect();
        Self { entries }
    }

    /// Whether any entry occurs in `text`.
    pub fn matches(&self, text: &TokenizedText) -> bool {
        self.entries
            .iter()
            .any(|entry| text.contains_phrase(&entry.phrase))
    }

    /// First entry in list order that occurs in `text`.
    pub fn first_match(&self, text: &TokenizedText) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| text.contains_phrase(&entry.phrase))
            .map(|entry| entry.label)
    }
}
