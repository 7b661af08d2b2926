//! Rule-based intent classification.
//!
//! Rules are tried in a fixed order and the first one whose predicate holds produces
//! the classification. The order matters: a follow-up question mentioning data must
//! be explained, not answered with fresh data.

use ingres_core::{
    DefaultYear, Intent, IntentType, Language, ReplyPicker, Session, StructuredQuery, Utterance,
};
use std::sync::Arc;

use crate::conversation::{ConversationKind, ConversationPatterns};
use crate::entities::EntityExtractor;
use crate::followup::{FollowUpKind, FollowUpResolver};
use crate::lexicon::TokenizedText;
use crate::replies::replies;
use crate::vocabulary::{
    CONFUSION_MARKERS, DATA_INDICATORS, DATA_REFERENCES, FOLLOW_UP_MARKERS, QUESTION_WORDS,
};

const DATA_QUERY_CONFIDENCE: f32 = 0.7;
const CLARIFICATION_CONFIDENCE: f32 = 0.8;
const CONVERSATION_CONFIDENCE: f32 = 0.8;

/// Rule that produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Question about the previous reply
    FollowUp(FollowUpKind),
    /// New data request
    DataQuery,
    /// User is confused
    Clarification,
    /// Small talk
    Conversation(ConversationKind),
}

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Rule that fired
    pub route: Route,
    /// Intent handed to the response synthesizer
    pub intent: Intent,
}

/// Everything a rule looks at.
struct RuleInput<'input> {
    text: &'input str,
    tokens: TokenizedText,
    language: Language,
    session: &'input Session,
}

struct IntentRule {
    name: &'static str,
    applies: fn(&RuleInput<'_>) -> bool,
    handle: fn(&IntentClassifier, &RuleInput<'_>) -> Classification,
}

/// Classification rules in priority order. The last rule always applies.
const RULES: [IntentRule; 4] = [
    IntentRule {
        name: "follow_up",
        applies: is_follow_up,
        handle: IntentClassifier::follow_up,
    },
    IntentRule {
        name: "data_query",
        applies: is_data_request,
        handle: IntentClassifier::data_query,
    },
    IntentRule {
        name: "clarification",
        applies: is_confused,
        handle: IntentClassifier::clarification,
    },
    IntentRule {
        name: "conversation",
        applies: always,
        handle: IntentClassifier::conversation,
    },
];

fn is_follow_up(input: &RuleInput<'_>) -> bool {
    FOLLOW_UP_MARKERS.matches(&input.tokens) && input.session.last_bot_metadata().is_some()
}

fn is_data_request(input: &RuleInput<'_>) -> bool {
    let asks_for_data = DATA_INDICATORS.matches(&input.tokens)
        || EntityExtractor::location_in(&input.tokens).is_some();
    let questions_data =
        QUESTION_WORDS.matches(&input.tokens) && DATA_REFERENCES.matches(&input.tokens);
    asks_for_data && !questions_data
}

fn is_confused(input: &RuleInput<'_>) -> bool {
    CONFUSION_MARKERS.matches(&input.tokens)
}

fn always(_: &RuleInput<'_>) -> bool {
    true
}

/// Rule-based fallback classifier used when no upstream model answers.
pub struct IntentClassifier {
    extractor: EntityExtractor,
    follow_ups: FollowUpResolver,
    small_talk: ConversationPatterns,
    default_year: DefaultYear,
    picker: Arc<dyn ReplyPicker>,
}

impl IntentClassifier {
    /// Creates a classifier that fills missing years from `default_year`.
    pub fn new(default_year: DefaultYear, picker: Arc<dyn ReplyPicker>) -> Self {
        Self {
            extractor: EntityExtractor,
            follow_ups: FollowUpResolver::new(default_year.clone()),
            small_talk: ConversationPatterns,
            default_year,
            picker,
        }
    }

    /// Default-year policy in effect.
    pub fn default_year(&self) -> &DefaultYear {
        &self.default_year
    }

    /// Classifies `text` written in `language`.
    ///
    /// `session` must already contain `text` as its latest user turn.
    pub fn classify(&self, text: &str, language: Language, session: &Session) -> Classification {
        let input = RuleInput {
            text,
            tokens: TokenizedText::new(text),
            language,
            session,
        };

        for rule in &RULES {
            if (rule.applies)(&input) {
                let classification = (rule.handle)(self, &input);
                tracing::debug!(
                    rule = rule.name,
                    route = ?classification.route,
                    language = %language,
                    "Classified message"
                );
                return classification;
            }
        }

        self.conversation(&input)
    }

    fn follow_up(&self, input: &RuleInput<'_>) -> Classification {
        let follow_up = self
            .follow_ups
            .resolve(input.text, input.language, input.session);
        Classification {
            route: Route::FollowUp(follow_up.kind),
            intent: Intent::Conversation(follow_up.utterance),
        }
    }

    fn data_query(&self, input: &RuleInput<'_>) -> Classification {
        let entities = self.extractor.extract(input.text);
        let year_was_defaulted = entities.year.is_none();
        let year = entities
            .year
            .unwrap_or_else(|| self.default_year.resolve());

        Classification {
            route: Route::DataQuery,
            intent: Intent::DataQuery(StructuredQuery {
                intent_type: IntentType::DataQuery,
                location: entities.location.map(str::to_owned),
                component: entities.component.unwrap_or_default(),
                year,
                period: entities.period,
                language: input.language,
                confidence: DATA_QUERY_CONFIDENCE,
                year_was_defaulted,
            }),
        }
    }

    #[allow(clippy::unused_self, reason = "rule handlers share one signature")]
    fn clarification(&self, input: &RuleInput<'_>) -> Classification {
        Classification {
            route: Route::Clarification,
            intent: Intent::Clarification(Utterance::new(
                replies(input.language).clarification,
                input.language,
                CLARIFICATION_CONFIDENCE,
            )),
        }
    }

    fn conversation(&self, input: &RuleInput<'_>) -> Classification {
        let (kind, reply) = self
            .small_talk
            .reply(input.text, input.language, self.picker.as_ref());
        Classification {
            route: Route::Conversation(kind),
            intent: Intent::Conversation(Utterance::new(
                reply,
                input.language,
                CONVERSATION_CONFIDENCE,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanguageDetector;
    use ingres_core::{
        Component, FixedPicker, Period, ReplyKind, SessionId, Turn, TurnMetadata,
    };

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(
            DefaultYear::Fixed("2024-2025".to_owned()),
            Arc::new(FixedPicker(0)),
        )
    }

    /// Pushes `text` as the pending user turn and classifies it.
    fn classify(session: &mut Session, text: &str) -> Classification {
        session.push_turn(Turn::user(text));
        let language = LanguageDetector.detect(text);
        classifier().classify(text, language, session)
    }

    fn fresh() -> Session {
        Session::new(SessionId::new("test"))
    }

    fn expect_query(classification: &Classification) -> &StructuredQuery {
        match &classification.intent {
            Intent::DataQuery(query) => query,
            other => panic!("expected a data query, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_data_request() {
        let classification = classify(&mut fresh(), "Show recharge data for Maharashtra 2024");
        assert_eq!(classification.route, Route::DataQuery);

        let query = expect_query(&classification);
        assert_eq!(query.location.as_deref(), Some("Maharashtra"));
        assert_eq!(query.component, Component::Recharge);
        assert_eq!(query.year, "2024-2025");
        assert_eq!(query.period, Period::Annual);
        assert_eq!(query.language, Language::English);
        assert!(!query.year_was_defaulted);
        assert!((query.confidence - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_location_alone_is_a_data_request() {
        let classification = classify(&mut fresh(), "Punjab water levels");
        let query = expect_query(&classification);
        assert_eq!(query.location.as_deref(), Some("Punjab"));
        assert_eq!(query.component, Component::Stage);
        assert_eq!(query.year, "2024-2025");
        assert!(query.year_was_defaulted);
    }

    #[test]
    fn test_data_request_without_location() {
        let classification = classify(&mut fresh(), "show me recharge data");
        let query = expect_query(&classification);
        assert!(!query.has_location());
    }

    #[test]
    fn test_greeting() {
        let classification = classify(&mut fresh(), "hello");
        assert_eq!(
            classification.route,
            Route::Conversation(ConversationKind::Greeting)
        );
        assert_eq!(classification.intent.language(), Language::English);
        match classification.intent {
            Intent::Conversation(utterance) => {
                assert_eq!(utterance.text, replies(Language::English).greetings[0]);
            }
            other => panic!("expected conversation, got {other:?}"),
        }
    }

    #[test]
    fn test_follow_up_beats_data_words() {
        let mut session = fresh();
        let query = expect_query(&classify(&mut session, "Show Pune data")).clone();
        session.push_turn(Turn::bot("data", TurnMetadata::from_query(&query, "Pune")));
        session.last_data_query = Some(query);

        let classification = classify(&mut session, "Pune ka data kyu dikhaya");
        assert_eq!(classification.route, Route::FollowUp(FollowUpKind::Location));
        assert_eq!(classification.intent.language(), Language::Hinglish);
        match classification.intent {
            Intent::Conversation(utterance) => {
                assert!(utterance.text.contains("\"Show Pune data\""));
            }
            other => panic!("expected conversation, got {other:?}"),
        }
    }

    #[test]
    fn test_follow_up_marker_needs_prior_bot_turn() {
        // Question about data with nothing shown yet: neither follow-up nor data request.
        let classification = classify(&mut fresh(), "why did you show that data");
        assert_eq!(
            classification.route,
            Route::Conversation(ConversationKind::Help)
        );
    }

    #[test]
    fn test_show_is_not_how() {
        let mut session = fresh();
        session.push_turn(Turn::user("hi"));
        session.push_turn(Turn::bot(
            "Hello!",
            TurnMetadata::Intent {
                intent: ReplyKind::Conversation,
            },
        ));
        let classification = classify(&mut session, "show Kerala extraction");
        assert_eq!(classification.route, Route::DataQuery);
    }

    #[test]
    fn test_confusion_without_history() {
        let classification = classify(&mut fresh(), "I am confused");
        assert_eq!(classification.route, Route::Clarification);
        assert_eq!(classification.intent.intent_type(), IntentType::Clarification);
        assert!((classification.intent.confidence() - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_confusion_marker_after_bot_turn_is_follow_up() {
        let mut session = fresh();
        session.push_turn(Turn::user("hello"));
        session.push_turn(Turn::bot(
            "Hello!",
            TurnMetadata::Intent {
                intent: ReplyKind::Conversation,
            },
        ));
        let classification = classify(&mut session, "samjha nahi");
        assert_eq!(classification.route, Route::FollowUp(FollowUpKind::Generic));
    }

    #[test]
    fn test_hinglish_request() {
        let classification = classify(&mut fresh(), "mujhe Nagpur ka rabi data chahiye 2022-23");
        let query = expect_query(&classification);
        assert_eq!(query.language, Language::Hinglish);
        assert_eq!(query.location.as_deref(), Some("Nagpur"));
        assert_eq!(query.period, Period::NonMonsoon);
        assert_eq!(query.year, "2022-23");
    }
}
