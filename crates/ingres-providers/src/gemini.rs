use async_trait::async_trait;
use ingres_core::{Error, Result, UpstreamClassifier, UpstreamConfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::{Duration, Instant};

/// Generative Language API base URL.
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model for Gemini.
const DEFAULT_MODEL: &str = "gemini-pro";
/// Env var key for Gemini API key.
const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Gemini `generateContent` classifier.
pub struct GeminiClassifier {
    /// HTTP client for API requests.
    client: Client,
    /// Gemini API key.
    api_key: String,
    /// Model name to use.
    model: String,
    /// API base URL without a trailing slash.
    endpoint: String,
}

impl GeminiClassifier {
    /// Creates a new `GeminiClassifier` from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the `GEMINI_API_KEY` environment variable is not set.
    pub fn new() -> Result<Self> {
        let api_key = env::var(ENV_GEMINI_API_KEY)
            .map_err(|_| Error::MissingApiKey(ENV_GEMINI_API_KEY.to_owned()))?;
        Self::with_api_key_direct(api_key)
    }

    /// Creates a new `GeminiClassifier` with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the provided API key is empty.
    pub fn with_api_key_direct(api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey(ENV_GEMINI_API_KEY.to_owned()));
        }

        Ok(Self {
            client: Client::default(),
            api_key,
            model: DEFAULT_MODEL.to_owned(),
            endpoint: GEMINI_API_URL.to_owned(),
        })
    }

    /// Creates a classifier from the `[upstream]` config section.
    ///
    /// # Errors
    ///
    /// Returns an error if neither the config nor the environment carries an API key.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let classifier = match config.configured_api_key() {
            Some(api_key) => Self::with_api_key_direct(api_key.to_owned())?,
            None => Self::new()?,
        };
        Ok(classifier
            .with_model(config.model.clone())
            .with_endpoint(config.endpoint.clone()))
    }

    /// Sets the model to use for generation.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_owned();
        self
    }

    /// Request URL without the key parameter.
    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Request payload for `generateContent`.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    /// Conversation contents; a single user prompt here.
    contents: Vec<GeminiContent>,
}

/// One content block of a request.
#[derive(Debug, Serialize)]
struct GeminiContent {
    /// Text parts of the block.
    parts: Vec<GeminiPart>,
}

/// Text part of a request.
#[derive(Debug, Serialize)]
struct GeminiPart {
    /// Prompt text.
    text: String,
}

/// Response payload returned by Gemini.
#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    /// Candidate generations, best first.
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// A single candidate generation.
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    /// Generated content; absent when the candidate was blocked.
    content: Option<GeminiResponseContent>,
}

/// Content of a candidate.
#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    /// Generated parts.
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

/// One generated part.
#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    /// Generated text, if this part is textual.
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[async_trait]
impl UpstreamClassifier for GeminiClassifier {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn classify(&self, prompt: &str) -> Result<String> {
        let start = Instant::now();

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_owned(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| Error::Upstream(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            return Err(Error::Upstream(format!(
                "Gemini API error {status}: {error_text}"
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|err| Error::Upstream(format!("Failed to parse Gemini response: {err}")))?;

        let text = gemini_response
            .into_text()
            .ok_or_else(|| Error::Upstream("No text in Gemini response".to_owned()))?;

        tracing::debug!(
            model = %self.model,
            latency_ms = whole_millis(start.elapsed()),
            "Gemini classification finished"
        );

        Ok(text)
    }
}

/// Milliseconds in `duration`, saturating at `u64::MAX`.
fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
