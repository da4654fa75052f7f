use std::sync::Arc;

use crate::gemini::TextGenerator;

#[derive(Clone)]
pub struct ChatService {
    generator: Arc<dyn TextGenerator>,
}

impl ChatService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Answers a media-literacy question. Remote failures turn into an
    /// apology rather than an error.
    pub async fn answer(&self, message: &str) -> String {
        let prompt = build_chat_prompt(message);
        match self.generator.generate(&prompt).await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!("chat generation failed: {err:#}");
                format!("Sorry, I encountered an error: {err}")
            }
        }
    }
}

fn build_chat_prompt(message: &str) -> String {
    format!(
        "You are a helpful AI assistant specializing in fake news detection and media literacy.
Answer the user's question in a friendly, informative way.

User question: {message}

Provide a clear, concise answer."
    )
}
