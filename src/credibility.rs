use std::sync::Arc;
use std::time::Instant;

use crate::format::{escape_html, format_analysis, FormattingResult};
use crate::gemini::TextGenerator;

#[derive(Clone)]
pub struct CredibilityService {
    generator: Arc<dyn TextGenerator>,
}

impl CredibilityService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Asks the remote model for a six-part critique and formats it.
    ///
    /// A failed remote call still yields a result: the error is shown as a
    /// visible fragment and there is no score.
    pub async fn analyze(&self, text: &str) -> FormattingResult {
        let started = Instant::now();
        let prompt = build_credibility_prompt(text);

        match self.generator.generate(&prompt).await {
            Ok(answer) => {
                let result = format_analysis(&answer);
                tracing::info!(
                    score = ?result.score,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "credibility analysis complete"
                );
                result
            }
            Err(err) => {
                tracing::warn!("credibility analysis failed: {err:#}");
                FormattingResult {
                    markup: format!(
                        r#"<p class="error">Error analyzing credibility: {}</p>"#,
                        escape_html(&format!("{err:#}"))
                    ),
                    score: None,
                }
            }
        }
    }
}

fn build_credibility_prompt(text: &str) -> String {
    format!(
        "Analyze the credibility of the following news text. Provide a structured analysis with:

1. **Source Reliability**: Assess if the source appears credible (2-3 sentences)
2. **Bias Detection**: Check for political, emotional, or sensationalist bias (2-3 sentences)
3. **Fact-Checking Indicators**: Look for verifiable claims, citations, evidence (2-3 sentences)
4. **Language Quality**: Evaluate grammar and professionalism (2-3 sentences)
5. **Red Flags**: Identify any clickbait, misleading headlines, conspiracy theories (bullet points if present)
6. **Overall Credibility Score**: Rate from 1-10 (10 = highly credible) and provide a brief justification

News Text: {text}

Format your response with clear numbered sections. Keep each section concise and focused."
    )
}
