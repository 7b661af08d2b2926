//! Core types and traits for the INGRES groundwater assistant.
//!
//! This crate provides the dialogue data model, error handling, configuration
//! and the collaborator traits shared by the NLU, provider and engine crates.
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

/// Configuration loading and defaults.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Session and turn model carried across a conversation.
pub mod session;
/// Poison-tolerant locking.
pub mod sync;
/// Trait definitions for injectable collaborators.
pub mod traits;
/// Core data types for queries, intents and replies.
pub mod types;

pub use config::{DialogueConfig, IngresConfig, ServerConfig, SessionConfig, UpstreamConfig};
pub use error::{Error, Result};
pub use session::{BotAction, MAX_TURNS, Role, Session, SessionId, Turn, TurnMetadata};
pub use sync::IgnoreLock;
pub use traits::{FixedPicker, RandomPicker, ReplyPicker, UpstreamClassifier};
pub use types::{
    Component, DefaultYear, FinancialYear, Intent, IntentType, Language, Period, ReplyKind,
    StructuredQuery, Utterance,
};
