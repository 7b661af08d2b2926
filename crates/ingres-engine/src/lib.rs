//! Conversation engine for the groundwater assistant.
//!
//! [`ChatEngine`] owns one turn end to end: it loads the session from a
//! [`SessionStore`], classifies the message (upstream model first, rules as fallback),
//! renders the reply with [`ResponseSynthesizer`] and commits the updated session.
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

pub mod api;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod mock_data;
pub mod store;
pub mod synthesizer;

pub use api::{ChatRequest, ChatResponse, DEFAULT_SESSION_ID};
pub use engine::ChatEngine;
pub use error::TurnError;
pub use mock_data::DataRecord;
pub use store::{InMemorySessionStore, SessionStore};
pub use synthesizer::{Reply, ResponseSynthesizer};
