use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use askama::Template;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::chat::ChatService;
use crate::classifier::Classifier;
use crate::config::AppConfig;
use crate::credibility::CredibilityService;
use crate::models::{
    AnalyzeRequest, ChatRequest, ChatResponse, ClassifyResponse, CredibilityResponse,
    LegacyCredibilityResponse, LegacyDetectionResponse, TextRequest,
};

const NO_TEXT_MESSAGE: &str = "No text provided";
const NO_MESSAGE_MESSAGE: &str = "No message provided";

/// Long-lived services shared by every request. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn Classifier>,
    pub credibility: CredibilityService,
    pub chat: ChatService,
    pub page: PageInfo,
}

#[derive(Clone, Debug)]
pub struct PageInfo {
    pub classifier_model: String,
    pub generator_model: String,
}

pub fn build_router(state: AppState, static_dir: &std::path::Path) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/healthz", get(health))
        .route("/api/classify", post(classify_handler))
        .route("/api/credibility", post(credibility_handler))
        .route("/api/chat", post(chat_handler))
        .route("/analyze", post(analyze_handler))
        .route("/chat", post(chat_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: AppConfig, state: AppState) -> Result<()> {
    let app = build_router(state, &config.static_dir);

    let addr: SocketAddr = config.bind_addr.parse()?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let template = IndexTemplate {
        classifier_model: state.page.classifier_model,
        generator_model: state.page.generator_model,
    };
    let body = template.render()?;

    Ok(Html(body))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn classify_handler(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let Json(request) = payload?;
    let text = required(&request.text, NO_TEXT_MESSAGE)?;
    let classification = state.classifier.classify(text).await?;
    Ok(Json(classification.into()))
}

async fn credibility_handler(
    State(state): State<AppState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<CredibilityResponse>, ApiError> {
    let Json(request) = payload?;
    let text = required(&request.text, NO_TEXT_MESSAGE)?;
    let result = state.credibility.analyze(text).await;
    Ok(Json(CredibilityResponse {
        markup: result.markup,
        score: result.score,
    }))
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload?;
    let message = required(&request.message, NO_MESSAGE_MESSAGE)?;
    let response = state.chat.answer(message).await;
    Ok(Json(ChatResponse { response }))
}

/// Single entry point used by older clients: `type` picks detection or
/// credibility analysis, and the bodies keep the old field names.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let text = required(&request.text, NO_TEXT_MESSAGE)?;

    match request.kind.as_deref().unwrap_or("detection") {
        "detection" => {
            let classification = state.classifier.classify(text).await?;
            Ok(Json(LegacyDetectionResponse::from(classification)).into_response())
        }
        "credibility" => {
            let result = state.credibility.analyze(text).await;
            Ok(Json(LegacyCredibilityResponse {
                credibility_analysis: result.markup,
                credibility_score: result.score,
            })
            .into_response())
        }
        other => Err(ApiError::bad_request(format!(
            "unknown analysis type: {other}"
        ))),
    }
}

fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(message.to_string()));
    }
    Ok(value)
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    classifier_model: String,
    generator_model: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{value:#}"),
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(value: askama::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: value.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self {
            status: value.status(),
            message: value.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), "request failed: {}", self.message);
        }
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::classifier::decide;
    use crate::gemini::TextGenerator;
    use crate::models::Classification;

    struct FixedClassifier;

    #[async_trait]
    impl Classifier for FixedClassifier {
        async fn classify(&self, text: &str) -> Result<Classification> {
            if text.contains("explode") {
                anyhow::bail!("inference server unavailable");
            }
            Ok(decide(0.1, 2.0))
        }
    }

    struct Canned(&'static str);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn app() -> Router {
        let generator: Arc<dyn TextGenerator> = Arc::new(Canned(
            "1. **Source Reliability**: Solid.\n6. **Overall Credibility Score**: 8/10",
        ));
        let state = AppState {
            classifier: Arc::new(FixedClassifier),
            credibility: CredibilityService::new(generator.clone()),
            chat: ChatService::new(generator),
            page: PageInfo {
                classifier_model: "test-discriminator".to_string(),
                generator_model: "test-generator".to_string(),
            },
        };
        build_router(state, std::path::Path::new("static"))
    }

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        let response = app().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn classify_returns_label_and_confidence() {
        let (status, body) =
            post_json("/api/classify", serde_json::json!({ "text": "Rates rose." })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "REAL");
        assert_eq!(body["display_label"], "REAL NEWS");
        let confidence = body["confidence"].as_f64().expect("confidence");
        assert!(confidence > 0.5 && confidence <= 1.0);
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let (status, body) = post_json("/api/classify", serde_json::json!({ "text": "  " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], NO_TEXT_MESSAGE);

        let (status, body) = post_json("/api/credibility", serde_json::json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], NO_TEXT_MESSAGE);
    }

    #[tokio::test]
    async fn classifier_failure_is_server_error() {
        let (status, body) =
            post_json("/api/classify", serde_json::json!({ "text": "explode" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("inference server unavailable"));
    }

    #[tokio::test]
    async fn credibility_returns_markup_and_score() {
        let (status, body) =
            post_json("/api/credibility", serde_json::json!({ "text": "A story." })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 8);
        assert!(body["markup"]
            .as_str()
            .unwrap_or_default()
            .contains(r#"<span class="section-number">1</span>Source Reliability"#));
    }

    #[tokio::test]
    async fn chat_requires_message() {
        let (status, body) = post_json("/api/chat", serde_json::json!({ "message": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], NO_MESSAGE_MESSAGE);

        let (status, body) = post_json("/chat", serde_json::json!({ "message": "hi" })).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"].as_str().unwrap_or_default().contains("8/10"));
    }

    #[tokio::test]
    async fn analyze_keeps_legacy_field_names() {
        let (status, body) = post_json("/analyze", serde_json::json!({ "text": "x" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "REAL NEWS");
        assert!(body.get("display_label").is_none());
        assert!(body["confidence"].as_f64().unwrap_or_default() > 0.5);

        let (status, body) = post_json(
            "/analyze",
            serde_json::json!({ "text": "x", "type": "credibility" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["credibility_score"], 8);
        assert!(body["credibility_analysis"]
            .as_str()
            .unwrap_or_default()
            .contains(r#"<div class="analysis-section">"#));
        assert!(body.get("markup").is_none());

        let (status, body) =
            post_json("/analyze", serde_json::json!({ "text": "x", "type": "vibes" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown analysis type: vibes");
    }

    #[tokio::test]
    async fn malformed_json_gets_error_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/classify")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .expect("request");
        let response = app().oneshot(request).await.expect("response");
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn index_page_renders() {
        let request = Request::builder().uri("/").body(Body::empty()).expect("request");
        let response = app().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let html = String::from_utf8_lossy(&bytes);
        assert!(html.contains("test-discriminator"));
        assert!(html.contains("/static/app.js"));
    }
}
