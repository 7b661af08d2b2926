//! Prompt construction and validation of upstream classifier replies.

use ingres_core::{
    Component, DefaultYear, Intent, IntentType, Language, Period, StructuredQuery, Utterance,
};
use serde::Deserialize;

use crate::entities::EntityExtractor;

/// Number of history turns included in the prompt.
pub const HISTORY_TURNS: usize = 10;

/// Confidence used when the reply omits one.
const DEFAULT_CONFIDENCE: f32 = 0.7;
/// Confidence of a raw-text echo.
const ECHO_CONFIDENCE: f32 = 0.5;

/// Renders the single-call classification prompt.
pub fn build_prompt(message: &str, history: &str) -> String {
    format!(
        r#"You are INGRES Virtual Assistant for India's groundwater data. Keep track of the whole conversation and answer naturally.

CONVERSATION HISTORY:
{history}

CURRENT MESSAGE: "{message}"

RULES:
1. Use the conversation history to understand references to earlier replies.
2. If the user asks why you did something, explain your reasoning.
3. If you used a default value such as the current financial year, say so and offer alternatives.
4. Tell new data requests apart from questions about previous replies.
5. Reply in the language the user is writing in (English or Hinglish), and switch when they switch.

Respond with exactly one JSON object:
For DATA: {{"type": "data_query", "location": "name", "component": "recharge/extraction/stage", "year": "YYYY-YYYY", "period": "annual/monsoon/non-monsoon", "user_language": "hinglish/english", "confidence": 0.8}}

For CONVERSATION or EXPLANATION: {{"type": "conversation", "response": "natural reply", "user_language": "hinglish/english", "confidence": 0.9}}

For CLARIFICATION: {{"type": "clarification", "response": "what was unclear and a request for detail", "user_language": "hinglish/english", "confidence": 0.7}}"#
    )
}

/// Shape of the JSON object a model is asked to produce.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum UpstreamReply {
    DataQuery {
        location: Option<String>,
        component: Option<String>,
        year: Option<String>,
        period: Option<String>,
        user_language: Option<String>,
        confidence: Option<f64>,
    },
    Conversation {
        response: Option<String>,
        user_language: Option<String>,
        confidence: Option<f64>,
    },
    Clarification {
        response: Option<String>,
        user_language: Option<String>,
        confidence: Option<f64>,
    },
}

/// Validates raw model output into an intent.
///
/// Returns `None` for an empty reply, which callers treat as an upstream failure.
/// Anything else that cannot be understood is echoed back as conversation.
pub fn interpret_reply(
    raw: &str,
    fallback_language: Language,
    default_year: &DefaultYear,
) -> Option<Intent> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let echo = || Intent::Conversation(Utterance::new(trimmed, fallback_language, ECHO_CONFIDENCE));
    let Some(parsed) = json_object(trimmed).and_then(|object| {
        serde_json::from_str::<UpstreamReply>(object)
            .map_err(|err| tracing::debug!("Upstream reply did not validate: {err}"))
            .ok()
    }) else {
        return Some(echo());
    };

    let intent = match parsed {
        UpstreamReply::DataQuery {
            location,
            component,
            year,
            period,
            user_language,
            confidence,
        } => {
            let year = year
                .map(|label| label.trim().to_owned())
                .filter(|label| !label.is_empty());
            let year_was_defaulted = year.is_none();
            Intent::DataQuery(StructuredQuery {
                intent_type: IntentType::DataQuery,
                location: normalize_location(location),
                component: component
                    .as_deref()
                    .and_then(Component::from_label)
                    .unwrap_or_default(),
                year: year.unwrap_or_else(|| default_year.resolve()),
                period: period
                    .as_deref()
                    .and_then(Period::from_label)
                    .unwrap_or_default(),
                language: language_or(user_language.as_deref(), fallback_language),
                confidence: clamp_confidence(confidence),
                year_was_defaulted,
            })
        }
        UpstreamReply::Conversation {
            response,
            user_language,
            confidence,
        } => match non_blank(response) {
            Some(text) => Intent::Conversation(Utterance::new(
                text,
                language_or(user_language.as_deref(), fallback_language),
                clamp_confidence(confidence),
            )),
            None => echo(),
        },
        UpstreamReply::Clarification {
            response,
            user_language,
            confidence,
        } => match non_blank(response) {
            Some(text) => Intent::Clarification(Utterance::new(
                text,
                language_or(user_language.as_deref(), fallback_language),
                clamp_confidence(confidence),
            )),
            None => echo(),
        },
    };

    Some(intent)
}

/// Span from the first `{` to the last `}`.
fn json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn language_or(label: Option<&str>, fallback: Language) -> Language {
    label.and_then(Language::from_label).unwrap_or(fallback)
}

fn clamp_confidence(confidence: Option<f64>) -> f32 {
    confidence.map_or(DEFAULT_CONFIDENCE, |value| value.clamp(0.0, 1.0) as f32)
}

/// Canonical name for known locations; other names pass through trimmed.
fn normalize_location(location: Option<String>) -> Option<String> {
    let name = location?.trim().to_owned();
    if name.is_empty() || matches!(name.to_lowercase().as_str(), "null" | "none" | "unknown") {
        return None;
    }
    Some(EntityExtractor::extract_location(&name).map_or(name, str::to_owned))
}
