//! Answers questions about the assistant's previous reply.

use ingres_core::{DefaultYear, Language, Session, Utterance};

use crate::entities::EntityExtractor;
use crate::lexicon::TokenizedText;
use crate::replies::{location_justification, replies, year_explanation};
use crate::vocabulary::{LOCATION_WORDS, WHY_MARKERS, YEAR_WORDS};

const NO_CONTEXT_CONFIDENCE: f32 = 0.6;
const JUSTIFICATION_CONFIDENCE: f32 = 0.9;
const GENERIC_CONFIDENCE: f32 = 0.8;

/// Which explanation a follow-up received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FollowUpKind {
    /// Nothing earlier to explain
    NoPriorAction,
    /// Why a location was shown
    Location,
    /// Why the default year was used
    Year,
    /// Any other question about the last reply
    Generic,
}

/// Resolved follow-up: the branch taken and the reply.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowUp {
    /// Branch taken
    pub kind: FollowUpKind,
    /// Reply to send
    pub utterance: Utterance,
}

/// Resolves "why did you…" questions against the session history.
#[derive(Debug, Clone, Default)]
pub struct FollowUpResolver {
    default_year: DefaultYear,
}

impl FollowUpResolver {
    /// Creates a resolver explaining `default_year` when asked about years.
    pub fn new(default_year: DefaultYear) -> Self {
        Self { default_year }
    }

    /// Explains the previous bot action.
    ///
    /// The session must already hold the current user turn; it is never quoted back.
    pub fn resolve(&self, text: &str, language: Language, session: &Session) -> FollowUp {
        let table = replies(language);
        let Some(metadata) = session.last_bot_metadata() else {
            return FollowUp {
                kind: FollowUpKind::NoPriorAction,
                utterance: Utterance::new(
                    table.unclear_reference,
                    language,
                    NO_CONTEXT_CONFIDENCE,
                ),
            };
        };

        let tokens = TokenizedText::new(text);
        let asks_why = WHY_MARKERS.matches(&tokens);

        if asks_why
            && (EntityExtractor::location_in(&tokens).is_some() || LOCATION_WORDS.matches(&tokens))
        {
            let shown = metadata.location().map(str::to_owned).or_else(|| {
                session
                    .last_data_query
                    .as_ref()
                    .and_then(|query| query.location.clone())
            });
            let reply = match (shown, Self::quoted_request(session)) {
                (Some(location), Some(quoted)) => {
                    location_justification(language, &location, quoted)
                }
                _ => table.location_justification.to_owned(),
            };
            return FollowUp {
                kind: FollowUpKind::Location,
                utterance: Utterance::new(reply, language, JUSTIFICATION_CONFIDENCE),
            };
        }

        if asks_why && (YEAR_WORDS.matches(&tokens) || Self::names_a_year(&tokens)) {
            let reply = year_explanation(language, self.default_year.financial_year());
            return FollowUp {
                kind: FollowUpKind::Year,
                utterance: Utterance::new(reply, language, JUSTIFICATION_CONFIDENCE),
            };
        }

        FollowUp {
            kind: FollowUpKind::Generic,
            utterance: Utterance::new(table.generic_explanation, language, GENERIC_CONFIDENCE),
        }
    }

    /// Most recent earlier user message that named a location or asked for data.
    fn quoted_request(session: &Session) -> Option<&str> {
        session
            .earlier_user_turns()
            .find(|turn| {
                let tokens = TokenizedText::new(&turn.text);
                tokens.contains_word("data") || EntityExtractor::location_in(&tokens).is_some()
            })
            .map(|turn| turn.text.as_str())
    }

    fn names_a_year(tokens: &TokenizedText) -> bool {
        tokens
            .tokens()
            .iter()
            .any(|token| token.len() == 4 && token.bytes().all(|byte| byte.is_ascii_digit()))
    }
}
