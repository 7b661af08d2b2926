//! Upstream classifier adapters.
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

/// Gemini classifier over the Generative Language REST API.
pub mod gemini;
/// Scripted classifier for tests.
pub mod mock;

pub use gemini::GeminiClassifier;
pub use mock::MockClassifier;
