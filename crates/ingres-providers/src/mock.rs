//! Scripted upstream classifier for testing.
//!
//! Replies are served in the order they were scripted, so a test can describe a
//! whole conversation (including failures and slow answers) without network access.

use async_trait::async_trait;
use ingres_core::{Error, IgnoreLock as _, Result, UpstreamClassifier};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// One scripted outcome.
#[derive(Debug, Clone)]
enum Scripted {
    /// Raw text returned as the model output
    Reply(String),
    /// Error returned instead of output
    Failure(String),
}

/// Upstream classifier that replays scripted outcomes.
#[derive(Clone, Default)]
pub struct MockClassifier {
    /// Outcomes still to be served, oldest first
    script: Arc<Mutex<VecDeque<Scripted>>>,
    /// Served once the script runs out
    default_reply: Arc<Mutex<Option<String>>>,
    /// Prompts received, for verification
    prompts: Arc<Mutex<Vec<String>>>,
    /// Artificial latency applied to every call
    delay: Option<Duration>,
    /// Reported by `is_available`
    unavailable: bool,
}

impl MockClassifier {
    /// Creates an available classifier with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw reply.
    #[must_use]
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script
            .lock_ignore_poison()
            .push_back(Scripted::Reply(reply.into()));
        self
    }

    /// Queues a failed call.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script
            .lock_ignore_poison()
            .push_back(Scripted::Failure(message.into()));
        self
    }

    /// Sets the reply used once the script is exhausted.
    #[must_use]
    pub fn with_default_reply(self, reply: impl Into<String>) -> Self {
        *self.default_reply.lock_ignore_poison() = Some(reply.into());
        self
    }

    /// Delays every call by `delay`.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reports the classifier as not configured.
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Number of `classify` calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts.lock_ignore_poison().len()
    }

    /// Prompts received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock_ignore_poison().clone()
    }
}

#[async_trait]
impl UpstreamClassifier for MockClassifier {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn is_available(&self) -> bool {
        !self.unavailable
    }

    async fn classify(&self, prompt: &str) -> Result<String> {
        self.prompts.lock_ignore_poison().push(prompt.to_owned());

        if let Some(delay) = self.delay {
            sleep(delay).await;
        }

        let next = self.script.lock_ignore_poison().pop_front();
        match next {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Failure(message)) => Err(Error::Upstream(message)),
            None => self
                .default_reply
                .lock_ignore_poison()
                .clone()
                .ok_or_else(|| Error::Upstream("Mock script exhausted".to_owned())),
        }
    }
}
