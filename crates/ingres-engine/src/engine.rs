//! Per-turn orchestration.
//!
//! A turn detects the language, records the user message, asks the upstream
//! classifier (falling back to the rule-based classifier), renders the reply and
//! records it. Turns for one session run one at a time; the session is committed to
//! the store only once the reply is complete.

use ingres_core::{
    Error, IgnoreLock as _, Intent, IngresConfig, Language, ReplyKind, ReplyPicker,
    Session, SessionId, Turn, UpstreamClassifier,
};
use ingres_nlu::{
    HISTORY_TURNS, IntentClassifier, LanguageDetector, build_prompt, interpret_reply,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;
use tokio::time::timeout;

use crate::api::ChatResponse;
use crate::error::TurnError;
use crate::store::SessionStore;
use crate::synthesizer::ResponseSynthesizer;

/// Per-session turn gates.
type GateMap = HashMap<SessionId, Arc<AsyncMutex<()>>>;

/// Conversation engine shared by all requests.
pub struct ChatEngine {
    store: Arc<dyn SessionStore>,
    detector: LanguageDetector,
    classifier: IntentClassifier,
    synthesizer: ResponseSynthesizer,
    upstream: Option<Arc<dyn UpstreamClassifier>>,
    upstream_timeout: Duration,
    gates: Mutex<GateMap>,
}

impl ChatEngine {
    /// Creates an engine without an upstream classifier.
    pub fn new(
        config: &IngresConfig,
        store: Arc<dyn SessionStore>,
        picker: Arc<dyn ReplyPicker>,
    ) -> Self {
        Self {
            store,
            detector: LanguageDetector,
            classifier: IntentClassifier::new(config.dialogue.default_year(), Arc::clone(&picker)),
            synthesizer: ResponseSynthesizer::new(picker),
            upstream: None,
            upstream_timeout: Duration::from_millis(config.upstream.timeout_ms),
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Consults `upstream` before the rule-based classifier.
    #[must_use]
    pub fn with_upstream(mut self, upstream: Arc<dyn UpstreamClassifier>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    /// Whether an upstream classifier is attached.
    pub fn has_upstream(&self) -> bool {
        self.upstream.is_some()
    }

    /// Number of live sessions in the store.
    pub async fn session_count(&self) -> usize {
        self.store.len().await
    }

    /// Handles one user message.
    ///
    /// # Errors
    ///
    /// Returns a [`TurnError`] if the session store fails; the stored session is left
    /// as it was before the turn.
    pub async fn handle_turn(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<ChatResponse, TurnError> {
        let gate = self.gate(session_id);
        let result = {
            let _turn = gate.lock().await;
            self.run_turn(session_id, message).await
        };
        self.release_gate(session_id, &gate);

        if let Err(error) = &result {
            tracing::error!(session = %session_id, "Turn failed: {error}");
        }
        result
    }

    async fn run_turn(
        &self,
        session_id: &SessionId,
        message: &str,
    ) -> Result<ChatResponse, TurnError> {
        let language = self.detector.detect(message);
        let stored = self
            .store
            .load(session_id)
            .await
            .map_err(|source| TurnError::new(source, language))?;

        // Work on a copy; nothing is visible to other turns until `save`.
        let mut session = stored.unwrap_or_else(|| Session::new(session_id.clone()));
        session.language = language;
        session.push_turn(Turn::user(message));

        let reply = if message.trim().is_empty() {
            ResponseSynthesizer::help(language)
        } else {
            let intent = match self.consult_upstream(message, language, &session).await {
                Some(intent) => intent,
                None => self.classifier.classify(message, language, &session).intent,
            };
            self.synthesizer.render(intent)
        };

        if reply.kind == ReplyKind::Data {
            session.last_data_query.clone_from(&reply.query);
        }
        session.push_turn(Turn::bot(reply.text.clone(), reply.metadata.clone()));

        tracing::debug!(
            session = %session_id,
            language = %language,
            reply_type = %reply.kind,
            "Turn complete"
        );

        self.store
            .save(session)
            .await
            .map_err(|source| TurnError::new(source, language))?;
        Ok(ChatResponse::from(reply))
    }

    /// Asks the upstream classifier; `None` means use the rules.
    async fn consult_upstream(
        &self,
        message: &str,
        language: Language,
        session: &Session,
    ) -> Option<Intent> {
        let upstream = self.upstream.as_ref()?;
        if !upstream.is_available().await {
            return None;
        }

        let prompt = build_prompt(message, &session.history_text(HISTORY_TURNS));
        let outcome = match timeout(self.upstream_timeout, upstream.classify(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(Error::UpstreamTimeout(
                u64::try_from(self.upstream_timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        };

        match outcome {
            Ok(raw) => {
                let intent = interpret_reply(&raw, language, self.classifier.default_year());
                if intent.is_none() {
                    tracing::warn!(
                        classifier = upstream.name(),
                        "Upstream classifier returned an empty reply, using rules"
                    );
                }
                intent
            }
            Err(error) if error.is_upstream() => {
                tracing::warn!(
                    classifier = upstream.name(),
                    "Upstream classifier failed, using rules: {error}"
                );
                None
            }
            Err(error) => {
                tracing::error!(
                    classifier = upstream.name(),
                    "Upstream classifier raised an unexpected error, using rules: {error}"
                );
                None
            }
        }
    }

    fn gate(&self, session_id: &SessionId) -> Arc<AsyncMutex<()>> {
        let mut gates = self.gates.lock_ignore_poison();
        Arc::clone(gates.entry(session_id.clone()).or_default())
    }

    /// Drops the gate once no other turn holds or awaits it.
    fn release_gate(&self, session_id: &SessionId, gate: &Arc<AsyncMutex<()>>) {
        let mut gates = self.gates.lock_ignore_poison();
        // One reference in the map, one held by the caller.
        if Arc::strong_count(gate) <= 2 {
            gates.remove(session_id);
        }
    }

    #[cfg(test)]
    fn gate_count(&self) -> usize {
        self.gates.lock_ignore_poison().len()
    }
}
