//! Rule-based understanding of groundwater questions.
//!
//! The crate turns a user message plus the session history into an [`Intent`]:
//! - [`LanguageDetector`] tags the register (English or Hinglish)
//! - [`EntityExtractor`] pulls location, component, year and period from free text
//! - [`IntentClassifier`] runs the ordered rule list, delegating follow-up questions
//!   to [`FollowUpResolver`] and small talk to [`ConversationPatterns`]
//! - [`upstream`] renders the prompt for an external model and validates its reply
//!
//! [`Intent`]: ingres_core::Intent
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::float_cmp,
        reason = "Allow for tests"
    )
)]

pub mod conversation;
pub mod entities;
pub mod followup;
pub mod intent;
pub mod language;
pub mod lexicon;
pub mod replies;
pub mod upstream;
pub mod vocabulary;

pub use conversation::{ConversationKind, ConversationPatterns};
pub use entities::{Entities, EntityExtractor};
pub use followup::{FollowUp, FollowUpKind, FollowUpResolver};
pub use intent::{Classification, IntentClassifier, Route};
pub use language::LanguageDetector;
pub use lexicon::{Lexicon, TokenizedText};
pub use upstream::{HISTORY_TURNS, build_prompt, interpret_reply};
