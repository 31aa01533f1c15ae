// src/services/gemini.rs
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::generator::{TextGenerator, UpstreamError};
use crate::config::GeminiConfig;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentRequest {
    /// Single user turn, default generation parameters.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
                role: Some("user".to_string()),
            }],
        }
    }
}

/// Finish reasons that void whatever text the candidate carries.
const BAD_FINISH_REASONS: [&str; 2] = ["SAFETY", "RECITATION"];

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined.
    ///
    /// A candidate stopped for safety or recitation is an error even when it
    /// carries partial text. A normal completion with no text yields `""`.
    pub fn text(&self) -> Result<String, UpstreamError> {
        let Some(candidate) = self.candidates.first() else {
            return match &self.prompt_feedback {
                Some(feedback) => Err(UpstreamError::Blocked(
                    feedback
                        .block_reason
                        .clone()
                        .unwrap_or_else(|| "no candidates".to_string()),
                )),
                None => Ok(String::new()),
            };
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if BAD_FINISH_REASONS.contains(&reason) {
                return Err(UpstreamError::Blocked(reason.to_string()));
            }
        }

        Ok(candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect())
    }
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, UpstreamError> {
        tracing::debug!(model = %self.config.model, prompt_len = prompt.len(), "calling generateContent");
        let request = GenerateContentRequest::from_prompt(prompt);
        self.generate_content(&request).await?.text()
    }
}
