//! Wire format of the query endpoint.

use ingres_core::{Language, ReplyKind, StructuredQuery};
use serde::{Deserialize, Serialize};

use crate::formatter::apology;
use crate::mock_data::DataRecord;
use crate::synthesizer::Reply;

/// Session id used when a client sends none.
pub const DEFAULT_SESSION_ID: &str = "default";

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_owned()
}

/// Body of `POST /api/query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// User message
    #[serde(default)]
    pub message: String,
    /// Client-chosen conversation id
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

/// Response of `POST /api/query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    /// Text shown to the user
    pub reply: String,
    /// Reply type
    #[serde(rename = "type")]
    pub kind: ReplyKind,
    /// Records behind a data reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Vec<DataRecord>>,
    /// Query behind a data reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<StructuredQuery>,
    /// Register of the reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Confidence of the producing branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ChatResponse {
    /// Apology for a failed turn, in `language`.
    pub fn apology(language: Language) -> Self {
        Self {
            reply: apology(language).to_owned(),
            kind: ReplyKind::Error,
            raw_data: None,
            query_params: None,
            language: Some(language),
            confidence: None,
        }
    }
}

impl From<Reply> for ChatResponse {
    fn from(reply: Reply) -> Self {
        Self {
            reply: reply.text,
            kind: reply.kind,
            raw_data: reply.raw_data,
            query_params: reply.query,
            language: reply.language,
            confidence: reply.confidence,
        }
    }
}
