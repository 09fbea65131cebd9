pub mod speech;

use axum::{body::Bytes, extract::{Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use faq_core::{AnswerEngine, EngineConfig, Reply};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use speech::{NoSpeech, Synthesizer, Transcriber};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Deserialize)]
pub struct AskParams {
    pub q: String,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    /// Set when no entry matched; the caller should hand off to a live agent.
    pub escalate: bool,
    pub score: Option<f32>,
}

#[derive(Serialize)]
pub struct AudioResponse {
    pub transcript: String,
    pub answer: String,
    pub escalate: bool,
    pub tts_audio_base64: String,
}

#[derive(Clone)]
pub struct AppState {
    // Reload swaps the whole engine; readers hold their own Arc.
    engine: Arc<RwLock<Arc<AnswerEngine>>>,
    document: Option<PathBuf>,
    config: EngineConfig,
    admin_token: Option<String>,
    transcriber: Arc<dyn Transcriber>,
    synthesizer: Arc<dyn Synthesizer>,
}

impl AppState {
    pub fn new(engine: AnswerEngine) -> Self {
        let config = engine.config().clone();
        Self {
            engine: Arc::new(RwLock::new(Arc::new(engine))),
            document: None,
            config,
            admin_token: None,
            transcriber: Arc::new(NoSpeech),
            synthesizer: Arc::new(NoSpeech),
        }
    }

    /// Build the engine from a document and remember the path for reloads.
    pub fn open(document: impl Into<PathBuf>, config: EngineConfig) -> faq_core::Result<Self> {
        let document = document.into();
        let engine = AnswerEngine::open(&document, config.clone())?;
        Ok(Self { document: Some(document), config, ..Self::new(engine) })
    }

    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        self.admin_token = token;
        self
    }

    pub fn with_speech(mut self, transcriber: Arc<dyn Transcriber>, synthesizer: Arc<dyn Synthesizer>) -> Self {
        self.transcriber = transcriber;
        self.synthesizer = synthesizer;
        self
    }

    pub fn engine(&self) -> Arc<AnswerEngine> {
        self.engine.read().clone()
    }

    fn answer(&self, question: &str) -> Reply {
        let reply = self.engine().respond(question);
        if reply.needs_escalation() {
            tracing::warn!(question, score = ?reply.score, "no confident answer; live agent required");
        }
        reply
    }
}

pub fn build_app(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/ask", get(ask_query_handler).post(ask_handler))
        .route("/ask_audio", post(ask_audio_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(state)
        .layer(cors)
}

pub async fn ask_query_handler(State(state): State<AppState>, Query(params): Query<AskParams>) -> Json<AskResponse> {
    Json(ask(&state, params.q))
}

pub async fn ask_handler(State(state): State<AppState>, Json(req): Json<AskRequest>) -> Json<AskResponse> {
    Json(ask(&state, req.question))
}

fn ask(state: &AppState, question: String) -> AskResponse {
    let reply = state.answer(&question);
    AskResponse { escalate: reply.needs_escalation(), score: reply.score, answer: reply.text, question }
}

pub async fn ask_audio_handler(
    State(state): State<AppState>,
    audio: Bytes,
) -> Result<Json<AudioResponse>, (StatusCode, Json<serde_json::Value>)> {
    let transcriber = state.transcriber.clone();
    let transcript = tokio::task::spawn_blocking(move || transcriber.transcribe(&audio))
        .await
        .map_err(internal_error)?;
    let transcript = transcript.trim().to_string();
    if transcript.is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": "Could not transcribe audio" }))));
    }

    let reply = state.answer(&transcript);
    let synthesizer = state.synthesizer.clone();
    let text = reply.text.clone();
    let audio = tokio::task::spawn_blocking(move || synthesizer.synthesize(&text))
        .await
        .map_err(internal_error)?;

    Ok(Json(AudioResponse {
        transcript,
        escalate: reply.needs_escalation(),
        answer: reply.text,
        tts_audio_base64: BASE64.encode(audio),
    }))
}

fn internal_error(e: tokio::task::JoinError) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!(error = %e, "speech task failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(serde_json::json!({ "error": "speech processing failed" })))
}

// --- Admin endpoints ---
async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let document = state
        .document
        .clone()
        .ok_or_else(|| (StatusCode::CONFLICT, "no source document configured".to_string()))?;

    let config = state.config.clone();
    let path = document.clone();
    let built = tokio::task::spawn_blocking(move || AnswerEngine::open(&path, config))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let engine = match built {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, document = %document.display(), "reload failed; keeping current index");
            return Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
        }
    };

    let entries = engine.len();
    *state.engine.write() = Arc::new(engine);
    tracing::info!(entries, document = %document.display(), "reloaded answer engine");
    Ok(Json(serde_json::json!({ "entries": entries })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
