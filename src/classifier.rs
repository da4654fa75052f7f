use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::models::{Classification, Label};

/// Fake/real sequence classifier.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification>;
}

/// Client for a text-classification inference server hosting the
/// discriminator model. The server tokenizes with truncation at the model's
/// maximum length; raw logits come back and the decision is made here.
#[derive(Clone)]
pub struct InferenceClassifier {
    client: Client,
    base_url: String,
    fake_label: String,
    real_label: String,
    max_input_words: usize,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

impl InferenceClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fake_label: config.fake_label.clone(),
            real_label: config.real_label.clone(),
            max_input_words: config.max_input_words,
        }
    }

    async fn predict(&self, text: &str) -> Result<Vec<LabelScore>> {
        #[derive(Serialize)]
        struct PredictReq<'a> {
            inputs: &'a str,
            truncate: bool,
            raw_scores: bool,
        }

        let url = format!("{}/predict", self.base_url);
        let scores = self
            .client
            .post(url)
            .json(&PredictReq {
                inputs: text,
                truncate: true,
                raw_scores: true,
            })
            .send()
            .await
            .context("failed to call classifier predict endpoint")?
            .error_for_status()
            .context("classifier predict returned non-success status")?
            .json::<Vec<LabelScore>>()
            .await
            .context("failed to decode classifier predict response")?;

        Ok(scores)
    }

    fn logit_for(&self, scores: &[LabelScore], label: &str) -> Result<f32> {
        scores
            .iter()
            .find(|entry| entry.label.eq_ignore_ascii_case(label))
            .map(|entry| entry.score)
            .ok_or_else(|| anyhow::anyhow!("classifier response has no `{label}` class"))
    }
}

#[async_trait]
impl Classifier for InferenceClassifier {
    async fn classify(&self, text: &str) -> Result<Classification> {
        let input = truncate_to_word_limit(text, self.max_input_words);
        let scores = self.predict(&input).await?;

        let fake = self.logit_for(&scores, &self.fake_label)?;
        let real = self.logit_for(&scores, &self.real_label)?;
        let classification = decide(fake, real);

        tracing::debug!(
            label = classification.label.as_str(),
            confidence = classification.confidence,
            "classified text"
        );
        Ok(classification)
    }
}

/// Softmax over the two class logits; the larger probability wins and is
/// reported as the confidence. Ties go to FAKE.
pub fn decide(fake_logit: f32, real_logit: f32) -> Classification {
    let max = fake_logit.max(real_logit);
    let fake_exp = (fake_logit - max).exp();
    let real_exp = (real_logit - max).exp();
    let total = fake_exp + real_exp;

    let fake_prob = fake_exp / total;
    let real_prob = real_exp / total;

    if real_prob > fake_prob {
        Classification {
            label: Label::Real,
            confidence: real_prob,
        }
    } else {
        Classification {
            label: Label::Fake,
            confidence: fake_prob,
        }
    }
}

fn truncate_to_word_limit(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
