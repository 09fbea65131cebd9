use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use faq_core::{AnswerEngine, EngineConfig, Messages};
use faq_server::speech::{Synthesizer, Transcriber};
use faq_server::{build_app, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;
use tower::ServiceExt;

const FAQ: &str = "What are your hours?\nWe are open 9 to 5.\nHow do I reset my password?\nGo to settings and click reset.\n";

fn tiny_state() -> AppState {
    AppState::new(AnswerEngine::from_pages(&[FAQ], EngineConfig::default()).unwrap())
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    (status, json)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn reload(token: Option<&str>) -> Request<Body> {
    let mut req = Request::post("/admin/reload");
    if let Some(t) = token {
        req = req.header("X-ADMIN-TOKEN", t);
    }
    req.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let app = build_app(tiny_state());
    let (status, body) = call(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn ask_returns_matching_answer() {
    let app = build_app(tiny_state());
    let (status, json) = call(&app, Request::get("/ask?q=reset%20my%20password").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["answer"], "Go to settings and click reset.");
    assert_eq!(json["escalate"], false);
    assert!(json["score"].as_f64().unwrap() > 0.1);
}

#[tokio::test]
async fn unmatched_question_escalates() {
    let app = build_app(tiny_state());
    let (status, json) = call(&app, post_json("/ask", serde_json::json!({ "question": "unrelated gibberish xyz" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["answer"], Messages::default().no_answer);
    assert_eq!(json["escalate"], true);
}

#[tokio::test]
async fn answer_mentioning_not_found_does_not_escalate() {
    let doc = "Why is my page not found?\nNo relevant page exists; the link was not found.\n";
    let app = build_app(AppState::new(AnswerEngine::from_pages(&[doc], EngineConfig::default()).unwrap()));
    let (_, json) = call(&app, post_json("/ask", serde_json::json!({ "question": "page not found" }))).await;
    assert_eq!(json["answer"], "No relevant page exists; the link was not found.");
    assert_eq!(json["escalate"], false);
}

#[tokio::test]
async fn blank_question_gets_validation_message() {
    let app = build_app(tiny_state());
    let (_, json) = call(&app, post_json("/ask", serde_json::json!({ "question": "   " }))).await;
    assert_eq!(json["answer"], Messages::default().invalid_question);
    assert_eq!(json["escalate"], false);
    assert!(json["score"].is_null());
}

struct FixedTranscript(&'static str);

impl Transcriber for FixedTranscript {
    fn transcribe(&self, _audio: &[u8]) -> String {
        self.0.to_string()
    }
}

struct EchoVoice;

impl Synthesizer for EchoVoice {
    fn synthesize(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }
}

#[tokio::test]
async fn audio_question_is_transcribed_and_voiced() {
    let state = tiny_state().with_speech(Arc::new(FixedTranscript("What are your hours?")), Arc::new(EchoVoice));
    let app = build_app(state);
    let req = Request::post("/ask_audio").body(Body::from(vec![0u8; 16])).unwrap();
    let (status, json) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["transcript"], "What are your hours?");
    assert_eq!(json["answer"], "We are open 9 to 5.");
    // base64 of "We are open 9 to 5."
    assert_eq!(json["tts_audio_base64"], "V2UgYXJlIG9wZW4gOSB0byA1Lg==");
}

#[tokio::test]
async fn untranscribable_audio_is_rejected() {
    let app = build_app(tiny_state());
    let req = Request::post("/ask_audio").body(Body::from(vec![1u8, 2, 3])).unwrap();
    let (status, json) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Could not transcribe audio");
}

#[tokio::test]
async fn reload_swaps_engine_atomically() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("faq.txt");
    fs::write(&path, FAQ).unwrap();
    let state = AppState::open(&path, EngineConfig::default()).unwrap().with_admin_token(Some("secret".into()));
    let before = state.engine();
    let app = build_app(state.clone());

    let (status, _) = call(&app, reload(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(&app, reload(Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    fs::write(&path, "Do you ship abroad?\nYes, worldwide.\n").unwrap();
    let (status, json) = call(&app, reload(Some("secret"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["entries"], 1);

    let (_, json) = call(&app, Request::get("/ask?q=ship%20abroad").body(Body::empty()).unwrap()).await;
    assert_eq!(json["answer"], "Yes, worldwide.");
    // A reader holding the previous engine still sees the old, complete index.
    assert_eq!(before.get_answer("reset my password"), "Go to settings and click reset.");
}

#[tokio::test]
async fn failed_reload_keeps_current_engine() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("faq.txt");
    fs::write(&path, FAQ).unwrap();
    let state = AppState::open(&path, EngineConfig::default()).unwrap().with_admin_token(Some("secret".into()));
    let app = build_app(state);

    fs::write(&path, "no questions in here\n").unwrap();
    let (status, _) = call(&app, reload(Some("secret"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, json) = call(&app, Request::get("/ask?q=reset%20my%20password").body(Body::empty()).unwrap()).await;
    assert_eq!(json["answer"], "Go to settings and click reset.");
}

#[tokio::test]
async fn reload_without_document_conflicts() {
    let app = build_app(tiny_state().with_admin_token(Some("secret".into())));
    let (status, _) = call(&app, reload(Some("secret"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
