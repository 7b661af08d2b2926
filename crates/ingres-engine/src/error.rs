//! Failure of a whole conversation turn.

use ingres_core::{Error, Language};
use thiserror::Error as ThisError;

use crate::api::ChatResponse;

/// A turn that could not be completed.
///
/// Carries the language detected for the failing message so the apology matches it.
#[derive(Debug, ThisError)]
#[error("Turn failed: {source}")]
pub struct TurnError {
    /// Underlying failure
    pub source: Error,
    /// Language detected for the failing message
    pub language: Language,
}

impl TurnError {
    /// Wraps `source` for a turn written in `language`.
    pub fn new(source: Error, language: Language) -> Self {
        Self { source, language }
    }

    /// Apology to send in place of a reply.
    pub fn into_apology(self) -> ChatResponse {
        ChatResponse::apology(self.language)
    }
}
