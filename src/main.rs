use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use detector::chat::ChatService;
use detector::classifier::{Classifier, InferenceClassifier};
use detector::credibility::CredibilityService;
use detector::gemini::{GeminiClient, TextGenerator};
use detector::server::PageInfo;
use detector::{run_server, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; credibility and chat answers will report errors");
    }

    let gemini = GeminiClient::new(&config.gemini);
    let page = PageInfo {
        classifier_model: config.classifier.model.clone(),
        generator_model: gemini.model().to_string(),
    };
    tracing::info!(
        classifier = %config.classifier.base_url,
        model = %config.classifier.model,
        generator = %gemini.model(),
        "services configured"
    );

    let classifier: Arc<dyn Classifier> = Arc::new(InferenceClassifier::new(&config.classifier));
    let generator: Arc<dyn TextGenerator> = Arc::new(gemini);

    let state = AppState {
        classifier,
        credibility: CredibilityService::new(generator.clone()),
        chat: ChatService::new(generator),
        page,
    };

    run_server(config, state).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
