use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Fake,
    Real,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Fake => "FAKE",
            Label::Real => "REAL",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Label::Fake => "FAKE NEWS",
            Label::Real => "REAL NEWS",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Classification {
    pub label: Label,
    pub confidence: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
    /// `detection` (default) or `credibility`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResponse {
    pub label: Label,
    pub display_label: String,
    pub confidence: f32,
}

impl From<Classification> for ClassifyResponse {
    fn from(value: Classification) -> Self {
        Self {
            label: value.label,
            display_label: value.label.display_name().to_string(),
            confidence: value.confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CredibilityResponse {
    pub markup: String,
    pub score: Option<u32>,
}

/// `/analyze` detection body: `label` is the display name ("FAKE NEWS").
#[derive(Debug, Clone, Serialize)]
pub struct LegacyDetectionResponse {
    pub label: String,
    pub confidence: f32,
}

impl From<Classification> for LegacyDetectionResponse {
    fn from(value: Classification) -> Self {
        Self {
            label: value.label.display_name().to_string(),
            confidence: value.confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LegacyCredibilityResponse {
    pub credibility_analysis: String,
    pub credibility_score: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
}
