//! HTTP surface of the groundwater assistant.
//!
//! Routes:
//! - `GET /health` answers `{"status":"ok"}`
//! - `POST /api/query` runs one conversation turn
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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use ingres_core::{IngresConfig, RandomPicker, SessionId};
use ingres_engine::{ChatEngine, ChatRequest, ChatResponse, InMemorySessionStore, TurnError};
use ingres_providers::GeminiClassifier;
use serde_json::{Value as JsonValue, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod cli;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Conversation engine
    pub engine: Arc<ChatEngine>,
}

impl AppState {
    /// Wraps `engine` for sharing across requests.
    pub fn new(engine: ChatEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Builds the engine described by `config`.
///
/// The Gemini classifier is attached only when `use_upstream` is set, the config
/// enables it and an API key can be found; otherwise turns use the rules alone.
pub fn build_engine(config: &IngresConfig, use_upstream: bool) -> ChatEngine {
    let store = Arc::new(InMemorySessionStore::new(&config.sessions));
    let engine = ChatEngine::new(config, store, Arc::new(RandomPicker));

    if !use_upstream || !config.upstream.enabled {
        tracing::info!("Upstream classifier disabled, using rules only");
        return engine;
    }

    match GeminiClassifier::from_config(&config.upstream) {
        Ok(classifier) => {
            tracing::info!(model = %config.upstream.model, "Upstream classifier enabled");
            engine.with_upstream(Arc::new(classifier))
        }
        Err(error) => {
            tracing::warn!("Upstream classifier unavailable, using rules only: {error}");
            engine
        }
    }
}

/// Router with every route and the HTTP layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/query", post(query))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<JsonValue> {
    Json(json!({ "status": "ok" }))
}

async fn query(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = SessionId::new(request.session_id);
    let response = state
        .engine
        .handle_turn(&session_id, &request.message)
        .await?;
    Ok(Json(response))
}

/// Failed turn rendered as an apology with status 500.
#[derive(Debug)]
pub struct ApiError(TurnError);

impl From<TurnError> for ApiError {
    fn from(error: TurnError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(self.0.into_apology()),
        )
            .into_response()
    }
}
