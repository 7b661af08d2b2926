//! Turns a classified intent into the reply sent to the user.

use ingres_core::{Intent, Language, ReplyKind, ReplyPicker, StructuredQuery, TurnMetadata};
use std::sync::Arc;

use crate::formatter::{fallback_text, format_data_reply, location_requests};
use crate::mock_data::{DataRecord, generate};

/// A rendered reply with everything the engine records and returns.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Text shown to the user
    pub text: String,
    /// Reply type reported to the UI
    pub kind: ReplyKind,
    /// Register of the reply, when known
    pub language: Option<Language>,
    /// Confidence of the producing branch, when meaningful
    pub confidence: Option<f32>,
    /// Records behind a data reply
    pub raw_data: Option<Vec<DataRecord>>,
    /// Query behind a data reply
    pub query: Option<StructuredQuery>,
    /// Annotation stored on the bot turn
    pub metadata: TurnMetadata,
}

impl Reply {
    fn plain(text: impl Into<String>, kind: ReplyKind, language: Option<Language>) -> Self {
        Self {
            text: text.into(),
            kind,
            language,
            confidence: None,
            raw_data: None,
            query: None,
            metadata: TurnMetadata::Intent { intent: kind },
        }
    }
}

/// Renders intents into replies.
pub struct ResponseSynthesizer {
    picker: Arc<dyn ReplyPicker>,
}

impl ResponseSynthesizer {
    /// Creates a synthesizer choosing among prompt variants with `picker`.
    pub fn new(picker: Arc<dyn ReplyPicker>) -> Self {
        Self { picker }
    }

    /// Renders `intent`.
    pub fn render(&self, intent: Intent) -> Reply {
        match intent {
            Intent::DataQuery(query) => self.render_query(query),
            Intent::Conversation(utterance) => Reply {
                confidence: Some(utterance.confidence),
                ..Reply::plain(
                    utterance.text,
                    ReplyKind::Conversation,
                    Some(utterance.language),
                )
            },
            Intent::Clarification(utterance) => Reply {
                confidence: Some(utterance.confidence),
                ..Reply::plain(
                    utterance.text,
                    ReplyKind::Clarification,
                    Some(utterance.language),
                )
            },
        }
    }

    /// Help text for a message with no content.
    pub fn help(language: Language) -> Reply {
        Reply::plain(fallback_text(language), ReplyKind::Text, None)
    }

    fn render_query(&self, query: StructuredQuery) -> Reply {
        let Some(location) = query
            .location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .map(str::to_owned)
        else {
            let prompt = self.picker.choose(location_requests(query.language));
            return Reply::plain(prompt, ReplyKind::LocationRequest, Some(query.language));
        };

        let records = generate(&location, query.component, &query.year, query.period);
        let text = format_data_reply(&records, &query, &location);
        tracing::debug!(
            location = %location,
            component = %query.component,
            year = %query.year,
            period = %query.period,
            records = records.len(),
            "Rendered data reply"
        );

        Reply {
            text,
            kind: ReplyKind::Data,
            language: Some(query.language),
            confidence: Some(query.confidence),
            raw_data: Some(records),
            metadata: TurnMetadata::from_query(&query, &location),
            query: Some(query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingres_core::{BotAction, Component, FixedPicker, IntentType, Period, Utterance};

    fn synthesizer(index: usize) -> ResponseSynthesizer {
        ResponseSynthesizer::new(Arc::new(FixedPicker(index)))
    }

    fn query(location: Option<&str>) -> StructuredQuery {
        StructuredQuery {
            intent_type: IntentType::DataQuery,
            location: location.map(str::to_owned),
            component: Component::Stage,
            year: "2024-2025".to_owned(),
            period: Period::Annual,
            language: Language::English,
            confidence: 0.7,
            year_was_defaulted: true,
        }
    }

    #[test]
    fn test_missing_location_requests_one() {
        let reply = synthesizer(1).render(Intent::DataQuery(query(None)));
        assert_eq!(reply.kind, ReplyKind::LocationRequest);
        assert_eq!(reply.text, location_requests(Language::English)[1]);
        assert!(reply.raw_data.is_none());
        assert_eq!(
            reply.metadata,
            TurnMetadata::Intent {
                intent: ReplyKind::LocationRequest
            }
        );
    }

    #[test]
    fn test_blank_location_is_missing() {
        let reply = synthesizer(0).render(Intent::DataQuery(query(Some("  "))));
        assert_eq!(reply.kind, ReplyKind::LocationRequest);
    }

    #[test]
    fn test_data_reply_carries_records_and_metadata() {
        let reply = synthesizer(0).render(Intent::DataQuery(query(Some("Punjab"))));
        assert_eq!(reply.kind, ReplyKind::Data);
        assert_eq!(reply.raw_data.as_ref().map(Vec::len), Some(3));
        assert_eq!(reply.query.as_ref().and_then(|query| query.location.as_deref()), Some("Punjab"));
        assert!(matches!(
            reply.metadata,
            TurnMetadata::DataAction {
                action: BotAction::ShowedData,
                component: Component::Stage,
                was_default_year: true,
                ..
            }
        ));
        assert!(reply.text.contains("STAGE Data for Punjab"));
    }

    #[test]
    fn test_utterances_pass_through() {
        let reply = synthesizer(0).render(Intent::Clarification(Utterance::new(
            "Eh?",
            Language::Hinglish,
            0.8,
        )));
        assert_eq!(reply.text, "Eh?");
        assert_eq!(reply.kind, ReplyKind::Clarification);
        assert_eq!(reply.language, Some(Language::Hinglish));
        assert!(reply
            .confidence
            .is_some_and(|confidence| (confidence - 0.8).abs() < f32::EPSILON));
    }

    #[test]
    fn test_help_reply() {
        let reply = ResponseSynthesizer::help(Language::English);
        assert_eq!(reply.kind, ReplyKind::Text);
        assert_eq!(reply.text, fallback_text(Language::English));
    }
}
