//! Gemini chat relay provider.
//!
//! Wraps a single non-streaming `generateContent` call; the reply text of
//! the first candidate is returned verbatim.

use crate::config::GeminiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed system preamble prepended to every relayed turn.
const SYSTEM_PREAMBLE: &str = "Você é a assistente virtual de uma clínica. \
    Responda de forma curta, cordial e objetiva, em português.";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("empty response from model")]
    EmptyResponse,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn relay(&self, message: &str, context: Option<&str>)
        -> Result<String, ProviderError>;
}

pub struct GeminiChatProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiChatProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base_url, self.config.model, self.config.api_key
        )
    }
}

#[async_trait]
impl ChatProvider for GeminiChatProvider {
    async fn relay(
        &self,
        message: &str,
        context: Option<&str>,
    ) -> Result<String, ProviderError> {
        let mut prompt = String::from(SYSTEM_PREAMBLE);
        if let Some(context) = context {
            prompt.push_str("\n\nContexto: ");
            prompt.push_str(context);
        }
        prompt.push_str("\n\n");
        prompt.push_str(message);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt }],
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            message_len = message.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("failed to parse response: {}", e)))?;

        api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(ProviderError::EmptyResponse)
    }
}

// Gemini API request/response types, trimmed to what the relay needs.

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
