//! Small-talk patterns: greetings, identity and capability questions, thanks.

use ingres_core::{Language, ReplyPicker};
use regex::Regex;
use std::sync::LazyLock;

use crate::replies::replies;

/// Which conversational pattern a message matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationKind {
    /// Bare greeting
    Greeting,
    /// Question about who the assistant is
    Identity,
    /// Question about what the assistant can do
    Capability,
    /// Thanks
    Thanks,
    /// Nothing matched; help text
    Help,
}

/// Compiled patterns for one register, tested in field order.
struct PatternSet {
    greeting: Regex,
    identity: Regex,
    capability: Regex,
    thanks: Regex,
}

impl PatternSet {
    fn kind(&self, text: &str) -> ConversationKind {
        if self.greeting.is_match(text) {
            ConversationKind::Greeting
        } else if self.identity.is_match(text) {
            ConversationKind::Identity
        } else if self.capability.is_match(text) {
            ConversationKind::Capability
        } else if self.thanks.is_match(text) {
            ConversationKind::Thanks
        } else {
            ConversationKind::Help
        }
    }
}

#[allow(clippy::expect_used, reason = "Regex patterns are known to be valid")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Valid conversation pattern")
}

static ENGLISH_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| PatternSet {
    greeting: compile(r"^(?:hi|hello|hey|greetings|good morning|good evening)[\s!.?]*$"),
    identity: compile(r"\b(?:who are you|what are you|introduce yourself)\b"),
    capability: compile(r"\b(?:what can you do|capabilities|help me|features)\b"),
    thanks: compile(r"\b(?:thank|appreciate|grateful)"),
});

static HINGLISH_PATTERNS: LazyLock<PatternSet> = LazyLock::new(|| PatternSet {
    greeting: compile(r"^(?:hi|hello|hey|hii|namaste|namaskar)[\s!.?]*$"),
    identity: compile(r"\b(?:kon ho|kaun ho|tum kon|aap kaun|kya ho)\b"),
    capability: compile(r"\b(?:kya kar|help kar|kaam kya|kya de sakte|capabilities)"),
    thanks: compile(r"\b(?:thanks|thank|dhanyawad|shukriya)"),
});

/// Matches small talk and produces the canned reply.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConversationPatterns;

impl ConversationPatterns {
    /// Which pattern `text` matches in `language`.
    pub fn kind(&self, text: &str, language: Language) -> ConversationKind {
        let normalized = text.trim().to_lowercase();
        let patterns = match language {
            Language::English => &*ENGLISH_PATTERNS,
            Language::Hinglish => &*HINGLISH_PATTERNS,
        };
        patterns.kind(&normalized)
    }

    /// Canned reply for `text`; greetings and thanks are chosen by `picker`.
    pub fn reply(
        &self,
        text: &str,
        language: Language,
        picker: &dyn ReplyPicker,
    ) -> (ConversationKind, &'static str) {
        let table = replies(language);
        let kind = self.kind(text, language);
        let reply = match kind {
            ConversationKind::Greeting => picker.choose(&table.greetings),
            ConversationKind::Identity => table.identity,
            ConversationKind::Capability => table.capabilities,
            ConversationKind::Thanks => picker.choose(&table.thanks),
            ConversationKind::Help => table.help,
        };
        (kind, reply)
    }
}
