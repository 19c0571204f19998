use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use nihongo_tutor::api::routes::{create_router, AppState};
use nihongo_tutor::api::DeprecatedNotice;
use nihongo_tutor::conversation::{AnswerSource, HttpAnswerClient};
use nihongo_tutor::error::{GenerationError, StoreError};
use nihongo_tutor::generation::GenerationService;
use nihongo_tutor::lesson::{Answer, Register};
use nihongo_tutor::model::LanguageModel;

const JAPAN_REPLY: &str = r#"Sure! Here is how you say it:
{
  "english": "Have you ever been to Japan?",
  "japanese": [
    {"word": "日本", "reading": "にほん"}, {"word": "に"}, {"word": "行った", "reading": "いった"},
    {"word": "こと"}, {"word": "が"}, {"word": "あります"}, {"word": "か"}, {"word": "?"}
  ],
  "grammarBreakdown": [{
    "english": "Have you ever been to Japan?",
    "japanese": [
      {"word": "日本", "reading": "にほん"}, {"word": "に"}, {"word": "行った", "reading": "いった"},
      {"word": "こと"}, {"word": "が"}, {"word": "あります"}, {"word": "か"}, {"word": "?"}
    ],
    "chunks": [
      {"japanese": [{"word": "日本", "reading": "にほん"}], "meaning": "Japan", "grammar": "Noun"},
      {"japanese": [{"word": "に"}], "meaning": "to", "grammar": "Particle"},
      {"japanese": [{"word": "行った", "reading": "いった"}, {"word": "こと"}, {"word": "が"}, {"word": "あります"}],
       "meaning": "have been", "grammar": "Verb た form + ことがあります"},
      {"japanese": [{"word": "か"}], "meaning": "question", "grammar": "Particle"},
      {"japanese": [{"word": "?"}], "meaning": "question", "grammar": "Punctuation"}
    ]
  }]
}
Let me know if you want more examples."#;

struct FakeModel {
    reply: Result<&'static str, &'static str>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    fn new(reply: Result<&'static str, &'static str>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn invoke(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .map(str::to_string)
            .map_err(|e| GenerationError::UpstreamCallFailure(e.to_string()))
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

fn app(model: Arc<FakeModel>) -> Router {
    let generation = GenerationService::new(model, Duration::from_secs(5));
    create_router(Arc::new(AppState { generation }), Path::new("static"))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn ask_returns_structured_answer() {
    let model = FakeModel::new(Ok(JAPAN_REPLY));
    let (status, body) = get(
        app(model.clone()),
        "/api/ai?question=Have%20you%20ever%20been%20to%20Japan%3F&speech=formal",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let answer: Answer = serde_json::from_value(body).unwrap();
    assert_eq!(answer.english, "Have you ever been to Japan?");
    assert!(!answer.spoken_text().is_empty());
    assert!(answer.grammar_breakdown[0].chunks_cover_sentence());

    let prompts = model.prompts.lock().unwrap();
    assert!(prompts[0].contains("\"Have you ever been to Japan?\" in Japanese in formal speech?"));
}

#[tokio::test]
async fn ask_defaults_question_and_register() {
    let model = FakeModel::new(Ok(JAPAN_REPLY));
    let (status, body) = get(app(model.clone()), "/api/ai").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("grammarBreakdown").is_some());
    let prompts = model.prompts.lock().unwrap();
    assert!(prompts[0].ends_with("in Japanese in formal speech?"));
}

#[tokio::test]
async fn ask_rejects_unknown_register() {
    let model = FakeModel::new(Ok(JAPAN_REPLY));
    let (status, body) = get(app(model.clone()), "/api/ai?question=Hi&speech=polite").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(model.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn upstream_failure_is_generic_500() {
    let (status, body) = get(app(FakeModel::new(Err("quota exceeded"))), "/api/ai?question=Hi").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate response");
    assert_eq!(body["code"], "UPSTREAM_CALL_FAILURE");
}

#[tokio::test]
async fn malformed_reply_is_generic_500() {
    let (status, body) = get(
        app(FakeModel::new(Ok("I would rather not answer."))),
        "/api/ai?question=Hi",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate response");
    assert_eq!(body["code"], "MALFORMED_OUTPUT");
}

#[tokio::test]
async fn tts_endpoint_is_deprecated_notice() {
    let (status, body) = get(app(FakeModel::new(Ok(JAPAN_REPLY))), "/api/tts").await;

    assert_eq!(status, StatusCode::OK);
    let notice: DeprecatedNotice = serde_json::from_value(body).unwrap();
    assert!(notice.deprecated);
    assert!(!notice.message.is_empty());
}

#[tokio::test]
async fn health_reports_version() {
    let (status, body) = get(app(FakeModel::new(Ok(JAPAN_REPLY))), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

async fn serve(model: Arc<FakeModel>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(model)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn http_client_fetches_answer() {
    let model = FakeModel::new(Ok(JAPAN_REPLY));
    let endpoint = serve(model.clone()).await;
    let client = HttpAnswerClient::new(endpoint, Duration::from_secs(5)).unwrap();

    let answer = client
        .fetch_answer("Is it raining & cold?", Register::Casual)
        .await
        .unwrap();

    assert_eq!(answer.japanese.len(), 8);
    let prompts = model.prompts.lock().unwrap();
    assert!(prompts[0].ends_with("How to say \"Is it raining & cold?\" in Japanese in casual speech?"));
}

#[tokio::test]
async fn http_client_surfaces_server_error() {
    let endpoint = serve(FakeModel::new(Err("boom"))).await;
    let client = HttpAnswerClient::new(endpoint, Duration::from_secs(5)).unwrap();

    let err = client.fetch_answer("Hi", Register::Formal).await.unwrap_err();
    match err {
        StoreError::Generation(message) => assert_eq!(message, "Failed to generate response"),
        other => panic!("unexpected error: {other:?}"),
    }
}
