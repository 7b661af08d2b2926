//! Per-conversant dialogue state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Component, Language, ReplyKind, StructuredQuery};

/// Number of turns kept in a session's history.
pub const MAX_TURNS: usize = 12;

/// Opaque session identifier supplied by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a client-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrowed identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Reply produced by the assistant
    Bot,
}

/// Structured action a bot turn performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotAction {
    /// Rendered a data summary
    ShowedData,
}

/// Annotation attached to a bot turn for follow-up resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnMetadata {
    /// The bot answered a data query
    #[serde(rename_all = "camelCase")]
    DataAction {
        /// What was done
        action: BotAction,
        /// Location the data was shown for
        location: String,
        /// Year label the data was shown for
        year: String,
        /// Component that was shown
        component: Component,
        /// Whether the year came from the default
        was_default_year: bool,
    },
    /// Any other reply
    Intent {
        /// Reply type that was produced
        intent: ReplyKind,
    },
}

impl TurnMetadata {
    /// Metadata for a rendered data query.
    pub fn from_query(query: &StructuredQuery, location: &str) -> Self {
        Self::DataAction {
            action: BotAction::ShowedData,
            location: location.to_owned(),
            year: query.year.clone(),
            component: query.component,
            was_default_year: query.year_was_defaulted,
        }
    }

    /// Location of a data action, if this records one.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::DataAction { location, .. } => Some(location),
            Self::Intent { .. } => None,
        }
    }
}

/// One message in a session's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Author of the message
    pub role: Role,
    /// Raw message content
    pub text: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Follow-up annotation, bot turns only
    pub metadata: Option<TurnMetadata>,
}

impl Turn {
    /// A user turn stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    /// A bot turn stamped now.
    pub fn bot(text: impl Into<String>, metadata: TurnMetadata) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            timestamp: Utc::now(),
            metadata: Some(metadata),
        }
    }
}

/// Dialogue state for a single conversant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Identifier the UI uses for this conversation
    pub id: SessionId,
    /// Register detected on the most recent user turn
    pub language: Language,
    /// Most recent turns, oldest first, at most [`MAX_TURNS`]
    turns: Vec<Turn>,
    /// Last data request that was answered
    pub last_data_query: Option<StructuredQuery>,
}

impl Session {
    /// Creates an empty session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            language: Language::English,
            turns: Vec::new(),
            last_data_query: None,
        }
    }

    /// Turns in insertion order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Appends a turn, evicting the oldest ones beyond [`MAX_TURNS`].
    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
        if self.turns.len() > MAX_TURNS {
            let overflow = self.turns.len() - MAX_TURNS;
            self.turns.drain(..overflow);
        }
    }

    /// Most recent bot turn.
    pub fn last_bot_turn(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|turn| turn.role == Role::Bot)
    }

    /// Metadata of the most recent bot turn.
    ///
    /// Only the latest bot turn is consulted; older annotations are stale by definition.
    pub fn last_bot_metadata(&self) -> Option<&TurnMetadata> {
        self.last_bot_turn()
            .and_then(|turn| turn.metadata.as_ref())
    }

    /// User turns before the current one, newest first.
    ///
    /// The trailing user turn is the message being answered and is skipped.
    pub fn earlier_user_turns(&self) -> impl Iterator<Item = &Turn> {
        let end = match self.turns.last() {
            Some(turn) if turn.role == Role::User => self.turns.len() - 1,
            _ => self.turns.len(),
        };
        self.turns[..end]
            .iter()
            .rev()
            .filter(|turn| turn.role == Role::User)
    }

    /// Renders the last `limit` turns as `Human:` / `Assistant:` lines.
    pub fn history_text(&self, limit: usize) -> String {
        let start = self.turns.len().saturating_sub(limit);
        self.turns[start..]
            .iter()
            .map(|turn| match turn.role {
                Role::User => format!("Human: {}", turn.text),
                Role::Bot => format!("Assistant: {}", turn.text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IntentType, Period};

    fn session() -> Session {
        Session::new(SessionId::new("test"))
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = session();
        for index in 0..40 {
            session.push_turn(Turn::user(format!("message {index}")));
            assert!(session.turns().len() <= MAX_TURNS);
        }
        assert_eq!(session.turns().len(), MAX_TURNS);
        assert_eq!(session.turns()[0].text, "message 28");
        assert_eq!(session.turns()[MAX_TURNS - 1].text, "message 39");
    }

    #[test]
    fn test_last_bot_metadata_reads_latest_bot_turn() {
        let mut session = session();
        assert!(session.last_bot_metadata().is_none());

        session.push_turn(Turn::user("hello"));
        session.push_turn(Turn::bot(
            "Hi!",
            TurnMetadata::Intent {
                intent: ReplyKind::Conversation,
            },
        ));
        session.push_turn(Turn::user("Pune data"));
        assert_eq!(
            session.last_bot_metadata(),
            Some(&TurnMetadata::Intent {
                intent: ReplyKind::Conversation
            })
        );
    }

    #[test]
    fn test_earlier_user_turns_skip_current_message() {
        let mut session = session();
        session.push_turn(Turn::user("first"));
        session.push_turn(Turn::bot(
            "reply",
            TurnMetadata::Intent {
                intent: ReplyKind::Text,
            },
        ));
        session.push_turn(Turn::user("second"));

        let texts: Vec<&str> = session
            .earlier_user_turns()
            .map(|turn| turn.text.as_str())
            .collect();
        assert_eq!(texts, vec!["first"]);
    }

    #[test]
    fn test_history_text_formats_roles() {
        let mut session = session();
        session.push_turn(Turn::user("hi"));
        session.push_turn(Turn::bot(
            "hello",
            TurnMetadata::Intent {
                intent: ReplyKind::Conversation,
            },
        ));
        assert_eq!(session.history_text(10), "Human: hi\nAssistant: hello");
        assert_eq!(session.history_text(1), "Assistant: hello");
    }

    #[test]
    fn test_metadata_from_query() {
        let query = StructuredQuery {
            intent_type: IntentType::DataQuery,
            location: Some("Pune".to_owned()),
            component: Component::Extraction,
            year: "2023-2024".to_owned(),
            period: Period::Annual,
            language: Language::English,
            confidence: 0.7,
            year_was_defaulted: false,
        };
        let metadata = TurnMetadata::from_query(&query, "Pune");
        assert_eq!(metadata.location(), Some("Pune"));
        assert!(matches!(
            metadata,
            TurnMetadata::DataAction {
                action: BotAction::ShowedData,
                component: Component::Extraction,
                was_default_year: false,
                ..
            }
        ));
    }
}
