use async_trait::async_trait;
use rand::Rng as _;

use crate::Result;

/// External language model that can classify a message in one call.
///
/// Implementations return the raw model text; validation happens on the caller's side
/// so that every adapter gets the same confidence contract.
#[async_trait]
pub trait UpstreamClassifier: Send + Sync {
    /// Returns the identifier used in logs.
    fn name(&self) -> &'static str;

    /// Checks whether this classifier is configured and ready to be called.
    async fn is_available(&self) -> bool;

    /// Sends the fully rendered prompt and returns the model's raw text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with an error
    /// status, or the response carries no text.
    async fn classify(&self, prompt: &str) -> Result<String>;
}

/// Source of choices among fixed reply variants.
pub trait ReplyPicker: Send + Sync {
    /// Returns an index in `0..candidates`. `candidates` is never zero.
    fn pick(&self, candidates: usize) -> usize;

    /// Picks one of `variants`; empty input yields an empty string.
    fn choose<'text>(&self, variants: &[&'text str]) -> &'text str {
        match variants.len() {
            0 => "",
            len => variants[self.pick(len).min(len - 1)],
        }
    }
}

/// Uniform random choice, used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl ReplyPicker for RandomPicker {
    fn pick(&self, candidates: usize) -> usize {
        rand::thread_rng().gen_range(0..candidates.max(1))
    }
}

/// Always picks the same index (wrapped into range), used in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl ReplyPicker for FixedPicker {
    fn pick(&self, candidates: usize) -> usize {
        self.0 % candidates.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picker_stays_in_range() {
        let picker = RandomPicker;
        for _ in 0..200 {
            assert!(picker.pick(3) < 3);
        }
        assert_eq!(picker.pick(1), 0);
    }

    #[test]
    fn test_fixed_picker_wraps() {
        assert_eq!(FixedPicker(1).pick(3), 1);
        assert_eq!(FixedPicker(4).pick(3), 1);
        assert_eq!(FixedPicker(7).pick(0), 0);
    }

    #[test]
    fn test_choose_returns_variant() {
        let variants = ["a", "b", "c"];
        assert_eq!(FixedPicker(2).choose(&variants), "c");
        assert_eq!(FixedPicker(5).choose(&variants), "c");
        assert_eq!(FixedPicker(0).choose(&[]), "");
    }
}
