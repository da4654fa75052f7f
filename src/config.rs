use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Clone, Debug)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub model: String,
    pub fake_label: String,
    pub real_label: String,
    pub max_input_words: usize,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub gemini: GeminiConfig,
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("FAKE_NEWS_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_string()),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            gemini: GeminiConfig {
                base_url: env::var("GEMINI_BASE_URL")
                    .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
                api_key: env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            },
            classifier: ClassifierConfig {
                base_url: env::var("CLASSIFIER_BASE_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8081".to_string()),
                model: env::var("CLASSIFIER_MODEL")
                    .unwrap_or_else(|_| "XSY/albert-base-v2-fakenews-discriminator".to_string()),
                fake_label: env::var("CLASSIFIER_FAKE_LABEL")
                    .unwrap_or_else(|_| "LABEL_0".to_string()),
                real_label: env::var("CLASSIFIER_REAL_LABEL")
                    .unwrap_or_else(|_| "LABEL_1".to_string()),
                max_input_words: env::var("CLASSIFIER_MAX_WORDS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(400),
            },
        }
    }
}
