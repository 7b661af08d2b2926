//! English / Hinglish register detection.

use ingres_core::Language;

use crate::vocabulary::HINGLISH_MARKERS;

/// Share of marker tokens above which a message counts as code-mixed.
const MARKER_RATIO_THRESHOLD: f64 = 0.2;

/// Whether `ch` lies in the Devanagari block.
fn is_devanagari(ch: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&ch)
}

/// Detects the language register of a message.
///
/// A whitespace token counts as a marker when it *contains* any code-mixed marker word,
/// so "dikhaya" matches "dikha". Any Devanagari character settles the question outright.
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageDetector;

impl LanguageDetector {
    /// Classifies `text` as English or Hinglish.
    pub fn detect(&self, text: &str) -> Language {
        if text.chars().any(is_devanagari) {
            return Language::Hinglish;
        }

        if Self::marker_ratio(text) > MARKER_RATIO_THRESHOLD {
            Language::Hinglish
        } else {
            Language::English
        }
    }

    /// Fraction of whitespace tokens containing a marker word; zero for empty text.
    pub fn marker_ratio(text: &str) -> f64 {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().collect();
        if tokens.is_empty() {
            return 0.0;
        }

        let matching = tokens
            .iter()
            .filter(|token| HINGLISH_MARKERS.iter().any(|marker| token.contains(marker)))
            .count();
        matching as f64 / tokens.len() as f64
    }
}
